use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use carwatch_bot::model::Listing;
use carwatch_bot::render::Browser;
use carwatch_bot::render::PageRequest;
use carwatch_bot::render::RenderContext;
use carwatch_bot::render::error::RenderError;
use carwatch_bot::repository::Repository;
use carwatch_bot::source::BaseSource;
use carwatch_bot::source::ListingSource;
use carwatch_bot::source::SourceInfo;
use carwatch_bot::source::error::ScrapeError;
use carwatch_bot::transport::Transport;
use carwatch_bot::transport::error::TransportError;
use scraper::Html;
use scraper::Selector;
use uuid::Uuid;

#[allow(dead_code)]
pub async fn setup_db() -> (Arc<Repository>, PathBuf) {
    let uuid = Uuid::new_v4();
    let db_path = std::env::temp_dir().join(format!("carwatch-bot-test-{}.db", uuid));
    let db_url = format!("sqlite://{}", db_path.to_str().unwrap());

    let repo = Repository::new(&db_url, db_path.to_str().unwrap())
        .await
        .expect("Failed to create database");

    repo.run_migrations().await.expect("Failed to run migrations");

    (Arc::new(repo), db_path)
}

#[allow(dead_code)]
pub async fn teardown_db(db_path: PathBuf) {
    if db_path.exists() {
        let _ = std::fs::remove_file(db_path);
    }
}

#[allow(dead_code)]
pub fn make_listing(link: &str) -> Listing {
    Listing {
        title: Some("Test Car".to_string()),
        price: Some("1000 $".to_string()),
        link: link.to_string(),
        ..Default::default()
    }
}

// MOCK SOURCE

#[derive(Default)]
pub struct MockSourceState {
    pub listings: Vec<Listing>,
    pub fail: bool,
    pub fetch_count: u32,
}

#[allow(dead_code)]
pub struct MockSource {
    pub base: BaseSource,
    pub state: Arc<RwLock<MockSourceState>>,
}

#[allow(dead_code)]
impl MockSource {
    pub fn new(name: &str) -> Self {
        let info = SourceInfo {
            name: name.to_string(),
            listing_url: format!("https://{}.test/list", name.to_lowercase()),
            marker: ".grid".to_string(),
        };
        let base = BaseSource::new(info, Duration::from_secs(5)).expect("valid mock url");

        Self {
            base,
            state: Arc::new(RwLock::new(MockSourceState::default())),
        }
    }

    pub fn set_listings(&self, listings: Vec<Listing>) {
        self.state.write().unwrap().listings = listings;
    }

    pub fn set_fail(&self, fail: bool) {
        self.state.write().unwrap().fail = fail;
    }

    pub fn fetch_count(&self) -> u32 {
        self.state.read().unwrap().fetch_count
    }
}

#[async_trait]
impl ListingSource for MockSource {
    async fn fetch_listings(
        &self,
        _ctx: &dyn RenderContext,
    ) -> Result<Vec<Listing>, ScrapeError> {
        let mut state = self.state.write().unwrap();
        state.fetch_count += 1;
        if state.fail {
            Err(ScrapeError::SourceUnavailable {
                message: "simulated timeout".to_string(),
            })
        } else {
            Ok(state.listings.clone())
        }
    }

    fn get_base(&self) -> &BaseSource {
        &self.base
    }
}

// MOCK TRANSPORT

#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(dead_code)]
pub struct SentNotification {
    pub chat_id: String,
    pub text: String,
    pub image_url: Option<String>,
}

#[derive(Default)]
pub struct MockTransportState {
    pub calls: Vec<SentNotification>,
    pub fail: bool,
}

#[derive(Default)]
pub struct MockTransport {
    pub state: Arc<RwLock<MockTransportState>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        self.state.write().unwrap().fail = fail;
    }

    /// Every attempted send, including ones that were told to fail.
    pub fn calls(&self) -> Vec<SentNotification> {
        self.state.read().unwrap().calls.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send_notification(
        &self,
        chat_id: &str,
        text: &str,
        image_url: Option<&str>,
    ) -> Result<(), TransportError> {
        let mut state = self.state.write().unwrap();
        state.calls.push(SentNotification {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            image_url: image_url.map(str::to_string),
        });
        if state.fail {
            Err(TransportError::SendFailed {
                message: "simulated outage".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

// STATIC BROWSER

/// Browser double that serves canned HTML keyed by URL, honoring the marker
/// the same way the real renderer does.
#[derive(Default)]
pub struct StaticBrowser {
    pages: Arc<RwLock<HashMap<String, String>>>,
}

#[allow(dead_code)]
impl StaticBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_page(&self, url: &str, html: &str) {
        self.pages
            .write()
            .unwrap()
            .insert(url.to_string(), html.to_string());
    }
}

#[async_trait]
impl Browser for StaticBrowser {
    async fn acquire(&self) -> Result<Box<dyn RenderContext>, RenderError> {
        Ok(Box::new(StaticRenderContext {
            pages: self.pages.clone(),
        }))
    }
}

pub struct StaticRenderContext {
    pages: Arc<RwLock<HashMap<String, String>>>,
}

#[async_trait]
impl RenderContext for StaticRenderContext {
    async fn fetch_page(&self, request: &PageRequest) -> Result<String, RenderError> {
        let html = self
            .pages
            .read()
            .unwrap()
            .get(&request.url)
            .cloned()
            .ok_or_else(|| RenderError::Navigation {
                url: request.url.clone(),
                message: "no page configured".to_string(),
            })?;

        let marker = Selector::parse(&request.marker).map_err(|_| RenderError::InvalidMarker {
            marker: request.marker.clone(),
        })?;
        if Html::parse_document(&html).select(&marker).next().is_none() {
            return Err(RenderError::MarkerTimeout {
                url: request.url.clone(),
                marker: request.marker.clone(),
            });
        }

        Ok(html)
    }
}
