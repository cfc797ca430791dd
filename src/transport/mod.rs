//! Outbound messaging transport.

use async_trait::async_trait;

use crate::transport::error::TransportError;

pub mod error;
pub mod telegram_transport;

/// Capability to deliver one notification to one subscriber.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `text` to `chat_id`, attaching the image when one is given.
    async fn send_notification(
        &self,
        chat_id: &str,
        text: &str,
        image_url: Option<&str>,
    ) -> Result<(), TransportError>;
}
