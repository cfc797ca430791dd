#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    #[error("Failed to launch the rendering browser: {message}")]
    Launch { message: String },

    #[error("Navigation to `{url}` failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Content marker `{marker}` never appeared on `{url}`.")]
    MarkerTimeout { url: String, marker: String },

    #[error("`{marker}` is not a valid CSS selector.")]
    InvalidMarker { marker: String },
}
