use crate::render::error::RenderError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ScrapeError {
    /// The site could not be reached or the page never finished loading.
    #[error("Source unavailable: {message}")]
    SourceUnavailable { message: String },

    /// The page loaded but the expected structure was not there.
    #[error("Source layout changed: {message}")]
    SourceLayoutChanged { message: String },
}

impl From<RenderError> for ScrapeError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::MarkerTimeout { .. } => ScrapeError::SourceLayoutChanged {
                message: e.to_string(),
            },
            _ => ScrapeError::SourceUnavailable {
                message: e.to_string(),
            },
        }
    }
}
