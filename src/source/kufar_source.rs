//! Listing adapter for auto.kufar.by.

use async_trait::async_trait;
use log::debug;
use scraper::Html;
use scraper::Selector;

use crate::config::Config;
use crate::error::AppError;
use crate::model::Listing;
use crate::render::PageRequest;
use crate::render::RenderContext;
use crate::source::BaseSource;
use crate::source::ListingSource;
use crate::source::SourceInfo;
use crate::source::error::ScrapeError;
use crate::source::select_attr;
use crate::source::select_text;

/// Kufar renders its grid into `[data-cy="auto-listing-block"]` and mangles
/// class names per build, so every field selector matches on the stable
/// `styles_*` prefix instead of the full class.
pub struct KufarSource {
    pub base: BaseSource,
    selectors: KufarSelectors,
}

struct KufarSelectors {
    card: Selector,
    title: Selector,
    price: Selector,
    params: Selector,
    region: Selector,
    date: Selector,
    image: Selector,
}

impl KufarSource {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let info = SourceInfo {
            name: "Kufar".to_string(),
            listing_url: format!(
                "{}?cur=USD&oph=1&prc=r%3A{}%2C{}",
                config.kufar_url, config.price_min, config.price_max
            ),
            marker: r#"[data-cy="auto-listing-block"]"#.to_string(),
        };

        let selectors = KufarSelectors {
            card: Selector::parse(
                r#"[data-cy="auto-listing-block"] section a[class*="styles_wrapper"]"#,
            )
            .expect("valid selector"),
            title: Selector::parse(r#"[class*="styles_title"]"#).expect("valid selector"),
            price: Selector::parse(r#"[class*="styles_price"]"#).expect("valid selector"),
            params: Selector::parse(r#"[class*="styles_params"]"#).expect("valid selector"),
            region: Selector::parse(r#"[class*="styles_region"]"#).expect("valid selector"),
            date: Selector::parse(r#"[class*="styles_date"]"#).expect("valid selector"),
            image: Selector::parse("img").expect("valid selector"),
        };

        Ok(Self {
            base: BaseSource::new(info, config.fetch_timeout)?,
            selectors,
        })
    }

    /// Extracts listings from a rendered listing page.
    pub fn parse_listings(&self, html: &str) -> Vec<Listing> {
        let document = Html::parse_document(html);
        let mut listings = Vec::new();

        for card in document.select(&self.selectors.card) {
            let Some(href) = card.value().attr("href") else {
                debug!("Skipping a Kufar ad card without href.");
                continue;
            };
            let Some(link) = self.base.canonical_link(href) else {
                debug!("Skipping a Kufar ad card with unparseable href `{href}`.");
                continue;
            };

            listings.push(Listing {
                title: select_text(&card, &self.selectors.title),
                price: select_text(&card, &self.selectors.price),
                spec_params: select_text(&card, &self.selectors.params),
                region: select_text(&card, &self.selectors.region),
                posted_date: select_text(&card, &self.selectors.date),
                image_url: select_attr(&card, &self.selectors.image, "src"),
                link,
            });
        }

        listings
    }
}

#[async_trait]
impl ListingSource for KufarSource {
    async fn fetch_listings(
        &self,
        ctx: &dyn RenderContext,
    ) -> Result<Vec<Listing>, ScrapeError> {
        let request = PageRequest {
            url: self.base.info.listing_url.clone(),
            marker: self.base.info.marker.clone(),
            timeout: self.base.fetch_timeout,
        };
        let html = ctx.fetch_page(&request).await?;
        Ok(self.parse_listings(&html))
    }

    fn get_base(&self) -> &BaseSource {
        &self.base
    }
}
