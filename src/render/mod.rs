//! Headless-browser page rendering.
//!
//! Listing sites render their grids client-side, so plain HTTP fetches return
//! empty shells. A [`Browser`] hands out one [`RenderContext`] per scan; the
//! context loads a page, waits for a content marker to appear in the rendered
//! DOM, and returns the DOM as an HTML string.

use std::time::Duration;

use async_trait::async_trait;

use crate::render::error::RenderError;

pub mod chrome_browser;
pub mod error;

/// A single page-load request.
#[derive(Clone, Debug)]
pub struct PageRequest {
    pub url: String,
    /// CSS selector that signals the page content has rendered.
    pub marker: String,
    /// Deadline for the whole load, marker wait included.
    pub timeout: Duration,
}

/// A live rendering session. Dropped (and cleaned up) at the end of a scan.
#[async_trait]
pub trait RenderContext: Send + Sync {
    /// Loads the page and returns the rendered DOM once the marker matches.
    async fn fetch_page(&self, request: &PageRequest) -> Result<String, RenderError>;
}

/// Capability to start rendering sessions.
#[async_trait]
pub trait Browser: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn RenderContext>, RenderError>;
}
