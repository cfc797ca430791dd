//! Deduplicated delivery of one listing to one subscriber.

use std::sync::Arc;

use log::debug;
use log::error;
use log::info;

use crate::dispatch::error::DispatchError;
use crate::dispatch::listing_message_builder::ListingMessageBuilder;
use crate::model::Listing;
use crate::repository::Repository;
use crate::transport::Transport;

pub struct NotificationDispatcher {
    repo: Arc<Repository>,
    transport: Arc<dyn Transport>,
}

impl NotificationDispatcher {
    pub fn new(repo: Arc<Repository>, transport: Arc<dyn Transport>) -> Self {
        Self { repo, transport }
    }

    /// Delivers `listing` to the subscriber unless it was already delivered.
    ///
    /// Returns `false` for an already-recorded link, `true` once the link has
    /// been recorded in this call. The record is written before the send: a
    /// send that fails afterwards is logged and the message is lost, which is
    /// the price of never notifying twice. Callers must only pass active
    /// subscribers.
    pub async fn notify(
        &self,
        chat_id: &str,
        listing: &Listing,
        source_name: &str,
    ) -> Result<bool, DispatchError> {
        let newly_recorded = self
            .repo
            .sent_link
            .append_if_missing(chat_id, &listing.link)
            .await?;
        if !newly_recorded {
            debug!(
                "Listing {} already delivered to chat {chat_id}, skipping.",
                listing.link
            );
            return Ok(false);
        }

        let text = ListingMessageBuilder::new(listing, source_name).build();
        match self
            .transport
            .send_notification(chat_id, &text, listing.image_url.as_deref())
            .await
        {
            Ok(()) => info!(
                "Notified chat {chat_id} about {} from {source_name}.",
                listing.link
            ),
            Err(e) => error!(
                "Failed to deliver {} to chat {chat_id}, message dropped: {e}",
                listing.link
            ),
        }

        Ok(true)
    }
}
