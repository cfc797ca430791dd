use crate::model::Listing;

/// Formats the human-readable notification for one listing.
///
/// Only fields the source actually provided are rendered; the identity link
/// and the source tag are always present.
pub struct ListingMessageBuilder<'a> {
    listing: &'a Listing,
    source_name: &'a str,
}

impl<'a> ListingMessageBuilder<'a> {
    pub fn new(listing: &'a Listing, source_name: &'a str) -> Self {
        Self {
            listing,
            source_name,
        }
    }

    pub fn build(&self) -> String {
        let l = self.listing;
        let mut lines = Vec::new();

        match &l.title {
            Some(title) => lines.push(format!("🚗 New listing on {}: {}", self.source_name, title)),
            None => lines.push(format!("🚗 New listing on {}", self.source_name)),
        }
        if let Some(price) = &l.price {
            lines.push(format!("Price: {price}"));
        }
        if let Some(params) = &l.spec_params {
            lines.push(format!("Specs: {params}"));
        }
        if let Some(region) = &l.region {
            lines.push(format!("Region: {region}"));
        }
        if let Some(date) = &l.posted_date {
            lines.push(format!("Posted: {date}"));
        }
        lines.push(format!("Link: {}", l.link));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_all_fields() {
        let listing = Listing {
            title: Some("Opel Astra".to_string()),
            price: Some("950 $".to_string()),
            spec_params: Some("2005, hatchback, 1.6 l".to_string()),
            region: Some("Minsk".to_string()),
            posted_date: Some("Yesterday 14:02".to_string()),
            image_url: Some("https://img.test/1.jpg".to_string()),
            link: "https://auto.kufar.by/item/123".to_string(),
        };

        let message = ListingMessageBuilder::new(&listing, "Kufar").build();
        assert_eq!(
            message,
            "🚗 New listing on Kufar: Opel Astra\n\
             Price: 950 $\n\
             Specs: 2005, hatchback, 1.6 l\n\
             Region: Minsk\n\
             Posted: Yesterday 14:02\n\
             Link: https://auto.kufar.by/item/123"
        );
    }

    #[test]
    fn test_build_skips_missing_fields() {
        let listing = Listing {
            link: "https://cars.av.by/opel/astra/123".to_string(),
            ..Default::default()
        };

        let message = ListingMessageBuilder::new(&listing, "av.by").build();
        assert_eq!(
            message,
            "🚗 New listing on av.by\nLink: https://cars.av.by/opel/astra/123"
        );
    }
}
