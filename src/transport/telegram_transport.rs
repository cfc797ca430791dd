//! Notification delivery over the Telegram Bot API.

use async_trait::async_trait;
use log::debug;
use teloxide::payloads::SendPhotoSetters;
use teloxide::prelude::*;
use teloxide::types::ChatId;
use teloxide::types::InputFile;
use url::Url;

use crate::transport::Transport;
use crate::transport::error::TransportError;

pub struct TelegramTransport {
    client: teloxide::Bot,
}

impl TelegramTransport {
    pub fn new(client: teloxide::Bot) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_notification(
        &self,
        chat_id: &str,
        text: &str,
        image_url: Option<&str>,
    ) -> Result<(), TransportError> {
        let id: i64 = chat_id.parse().map_err(|_| TransportError::InvalidChatId {
            chat_id: chat_id.to_string(),
        })?;
        let chat = ChatId(id);

        // An image URL the Telegram API would reject is not worth losing the
        // notification over; fall back to text.
        match image_url.and_then(|u| Url::parse(u).ok()) {
            Some(image) => {
                debug!("Sending photo notification to chat {chat_id}.");
                self.client
                    .send_photo(chat, InputFile::url(image))
                    .caption(text.to_string())
                    .await?;
            }
            None => {
                debug!("Sending text notification to chat {chat_id}.");
                self.client.send_message(chat, text).await?;
            }
        }
        Ok(())
    }
}
