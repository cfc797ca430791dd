//! Subscription management service.

use std::sync::Arc;

use log::info;

use crate::repository::Repository;
use crate::service::error::ServiceError;

/// Service behind the bot's `/subscribe` and `/unsubscribe` commands.
pub struct SubscriptionService {
    repo: Arc<Repository>,
}

/// What a subscribe request actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// First contact; a new active subscriber was created.
    Created,
    /// An inactive subscriber was switched back on. The sent-log is kept, so
    /// nothing already delivered is ever replayed.
    Reactivated,
    /// Already active; nothing changed.
    AlreadyActive,
}

/// What an unsubscribe request actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsubscribeOutcome {
    Deactivated,
    /// Unknown or already inactive; nothing changed.
    NotSubscribed,
}

impl SubscriptionService {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    pub async fn subscribe(&self, chat_id: &str) -> Result<SubscribeOutcome, ServiceError> {
        match self.repo.subscriber.select_by_chat_id(chat_id).await? {
            None => {
                self.repo.subscriber.insert(chat_id).await?;
                info!("New subscriber: {chat_id}");
                Ok(SubscribeOutcome::Created)
            }
            Some(subscriber) if !subscriber.is_active => {
                self.repo.subscriber.set_active(chat_id, true).await?;
                info!("Subscription reactivated: {chat_id}");
                Ok(SubscribeOutcome::Reactivated)
            }
            Some(_) => Ok(SubscribeOutcome::AlreadyActive),
        }
    }

    pub async fn unsubscribe(&self, chat_id: &str) -> Result<UnsubscribeOutcome, ServiceError> {
        match self.repo.subscriber.select_by_chat_id(chat_id).await? {
            Some(subscriber) if subscriber.is_active => {
                self.repo.subscriber.set_active(chat_id, false).await?;
                info!("Subscriber unsubscribed: {chat_id}");
                Ok(UnsubscribeOutcome::Deactivated)
            }
            _ => Ok(UnsubscribeOutcome::NotSubscribed),
        }
    }
}
