//! Listing adapter for cars.av.by.

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

pub struct AvBySource {
    pub base: BaseSource,
    selectors: AvBySelectors,
}

struct AvBySelectors {
    card: Selector,
    link: Selector,
    title: Selector,
    price: Selector,
    params: Selector,
    region: Selector,
    date: Selector,
    image: Selector,
}

impl AvBySource {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let info = SourceInfo {
            name: "av.by".to_string(),
            listing_url: format!(
                "{}?price_usd%5Bmin%5D={}&price_usd%5Bmax%5D={}",
                config.avby_url, config.price_min, config.price_max
            ),
            marker: ".listing".to_string(),
        };

        let selectors = AvBySelectors {
            card: Selector::parse(".listing .listing-item").expect("valid selector"),
            link: Selector::parse("a.listing-item__link").expect("valid selector"),
            title: Selector::parse(".listing-item__title").expect("valid selector"),
            price: Selector::parse(".listing-item__price").expect("valid selector"),
            params: Selector::parse(".listing-item__params").expect("valid selector"),
            region: Selector::parse(".listing-item__place").expect("valid selector"),
            date: Selector::parse(".listing-item__date").expect("valid selector"),
            image: Selector::parse(".listing-item__photo img").expect("valid selector"),
        };

        Ok(Self {
            base: BaseSource::new(info, config.fetch_timeout)?,
            selectors,
        })
    }

    /// Extracts listings from a rendered filter page.
    pub fn parse_listings(&self, html: &str) -> Vec<Listing> {
        let document = Html::parse_document(html);
        let mut listings = Vec::new();

        for card in document.select(&self.selectors.card) {
            let Some(href) = select_attr(&card, &self.selectors.link, "href") else {
                debug!("Skipping an av.by ad card without a link.");
                continue;
            };
            let Some(link) = self.base.canonical_link(&href) else {
                debug!("Skipping an av.by ad card with unparseable href `{href}`.");
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
impl ListingSource for AvBySource {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_url_encodes_price_filter() {
        let mut config = Config::new();
        config.price_min = 500;
        config.price_max = 2000;
        let source = AvBySource::new(&config).unwrap();
        assert_eq!(
            source.base.info.listing_url,
            "https://cars.av.by/filter?price_usd%5Bmin%5D=500&price_usd%5Bmax%5D=2000"
        );
    }
}
