//! Table-level tests for the subscriber store.

mod common;

#[tokio::test]
async fn test_insert_and_select_subscriber() {
    let (repo, db_path) = common::setup_db().await;

    let id = repo.subscriber.insert("111").await.unwrap();
    assert!(id > 0);

    let sub = repo
        .subscriber
        .select_by_chat_id("111")
        .await
        .unwrap()
        .expect("subscriber should exist");
    assert_eq!(sub.chat_id, "111");
    assert!(sub.is_active);

    assert!(repo.subscriber.select_by_chat_id("999").await.unwrap().is_none());

    common::teardown_db(db_path).await;
}

#[tokio::test]
async fn test_active_chat_ids_excludes_deactivated() {
    let (repo, db_path) = common::setup_db().await;

    repo.subscriber.insert("111").await.unwrap();
    repo.subscriber.insert("222").await.unwrap();
    repo.subscriber.set_active("222", false).await.unwrap();

    let active = repo.subscriber.select_active_chat_ids().await.unwrap();
    assert_eq!(active, vec!["111".to_string()]);

    repo.subscriber.set_active("222", true).await.unwrap();
    let active = repo.subscriber.select_active_chat_ids().await.unwrap();
    assert_eq!(active.len(), 2);

    common::teardown_db(db_path).await;
}

#[tokio::test]
async fn test_append_if_missing_is_atomic_check_and_set() {
    let (repo, db_path) = common::setup_db().await;

    repo.subscriber.insert("111").await.unwrap();

    let link = "https://auto.kufar.by/item/110011223344";
    assert!(repo.sent_link.append_if_missing("111", link).await.unwrap());
    assert!(!repo.sent_link.append_if_missing("111", link).await.unwrap());
    assert!(repo.sent_link.exists("111", link).await.unwrap());
    assert!(!repo.sent_link.exists("111", "https://other").await.unwrap());

    // The same link is independent per subscriber.
    repo.subscriber.insert("222").await.unwrap();
    assert!(repo.sent_link.append_if_missing("222", link).await.unwrap());

    common::teardown_db(db_path).await;
}

#[tokio::test]
async fn test_sent_links_keep_delivery_order() {
    let (repo, db_path) = common::setup_db().await;

    repo.subscriber.insert("111").await.unwrap();
    for n in 1..=3 {
        repo.sent_link
            .append_if_missing("111", &format!("https://site/a/{n}"))
            .await
            .unwrap();
    }
    // Duplicate appends do not disturb the log.
    repo.sent_link
        .append_if_missing("111", "https://site/a/2")
        .await
        .unwrap();

    let links = repo.sent_link.select_links_by_chat_id("111").await.unwrap();
    assert_eq!(
        links,
        vec![
            "https://site/a/1".to_string(),
            "https://site/a/2".to_string(),
            "https://site/a/3".to_string(),
        ]
    );

    common::teardown_db(db_path).await;
}
