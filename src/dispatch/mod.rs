//! Per-subscriber notification dispatch.

pub mod error;
pub mod listing_message_builder;
pub mod notification_dispatcher;
