//! Listing source adapters.
//!
//! One adapter per classified-ad site. Everything site-specific (the listing
//! URL with its encoded price filter, the rendered-content marker, the card
//! and field selectors) lives inside the adapter; the scan orchestrator only
//! ever iterates `Sources` and calls [`ListingSource::fetch_listings`].

use async_trait::async_trait;
use scraper::ElementRef;
use scraper::Selector;
use url::Url;

use crate::error::AppError;
use crate::model::Listing;
use crate::render::RenderContext;
use crate::source::error::ScrapeError;

pub mod avby_source;
pub mod error;
pub mod kufar_source;
pub mod sources;

/// Static description of one listing site.
#[derive(Clone, Debug)]
pub struct SourceInfo {
    /// Human-readable tag shown in notifications, e.g. "Kufar".
    pub name: String,
    /// Full listing URL including the encoded price filter.
    pub listing_url: String,
    /// CSS selector whose presence means the listing grid has rendered.
    pub marker: String,
}

/// Shared plumbing for source adapters.
pub struct BaseSource {
    pub info: SourceInfo,
    pub fetch_timeout: std::time::Duration,
    origin: Url,
}

impl BaseSource {
    pub fn new(info: SourceInfo, fetch_timeout: std::time::Duration) -> Result<Self, AppError> {
        let origin = Url::parse(&info.listing_url).map_err(|e| AppError::ConfigurationError {
            msg: format!("Invalid listing URL `{}`: {e}", info.listing_url),
        })?;
        Ok(Self {
            info,
            fetch_timeout,
            origin,
        })
    }

    /// Resolves an ad card href into the stable identity URL.
    ///
    /// Sites append tracking queries and fragments that vary between scans;
    /// stripping them is what keeps two scrapes of the same ad byte-identical.
    pub fn canonical_link(&self, href: &str) -> Option<String> {
        let mut url = self.origin.join(href).ok()?;
        url.set_query(None);
        url.set_fragment(None);
        Some(url.to_string())
    }
}

#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetches and normalizes the current listings of this source.
    async fn fetch_listings(&self, ctx: &dyn RenderContext)
    -> Result<Vec<Listing>, ScrapeError>;

    fn get_base(&self) -> &BaseSource;
}

/// First non-empty text match under `card`, trimmed. `None` when the selector
/// finds nothing; a card missing one field still yields a listing.
pub(crate) fn select_text(card: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    let text = card
        .select(selector)
        .next()?
        .text()
        .collect::<Vec<_>>()
        .join(" ");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

pub(crate) fn select_attr(
    card: &ElementRef<'_>,
    selector: &Selector,
    attr: &str,
) -> Option<String> {
    card.select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}
