#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TransportError {
    #[error("`{chat_id}` is not a valid chat id.")]
    InvalidChatId { chat_id: String },

    #[error("Failed to send notification: {message}")]
    SendFailed { message: String },

    #[error("Telegram API request failed: {0}")]
    Api(#[from] teloxide::RequestError),
}
