use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use sqlx::FromRow;

/// One vehicle advertisement, normalized across listing sites.
///
/// Every field except `link` is best-effort: a site can drop or rename a css
/// class at any time, and a card that lost its price is still worth
/// delivering. `link` is the identity of the ad and drives deduplication, so
/// cards without one are discarded during extraction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub title: Option<String>,
    /// Price as formatted by the source site, e.g. "900 $".
    pub price: Option<String>,
    /// Free-text spec line, e.g. "2004, sedan, 2.0 l, petrol".
    pub spec_params: Option<String>,
    pub region: Option<String>,
    /// Posting date as formatted by the source site.
    pub posted_date: Option<String>,
    pub image_url: Option<String>,
    /// Canonicalized ad URL. Stable across scans for the same ad.
    pub link: String,
}

/// A notification subscriber, one row per Telegram chat.
#[derive(FromRow, Serialize, Default, Clone, Debug)]
pub struct SubscriberModel {
    pub id: i64,
    /// Telegram chat id, stored as text.
    pub chat_id: String,
    /// Inactive subscribers keep their row and sent-log but receive nothing.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// One delivered listing link. Append-only; rows are never removed.
#[derive(FromRow, Serialize, Default, Clone, Debug)]
pub struct SentLinkModel {
    pub id: i64,
    pub chat_id: String,
    pub link: String,
    pub sent_at: DateTime<Utc>,
}
