//! One full fetch-all-sources-then-notify-all-subscribers cycle.

use std::sync::Arc;

use log::debug;
use log::error;
use log::info;

use crate::dispatch::notification_dispatcher::NotificationDispatcher;
use crate::model::Listing;
use crate::render::Browser;
use crate::render::RenderContext;
use crate::repository::Repository;
use crate::source::sources::Sources;

pub struct ScanOrchestrator {
    browser: Arc<dyn Browser>,
    sources: Arc<Sources>,
    repo: Arc<Repository>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl ScanOrchestrator {
    pub fn new(
        browser: Arc<dyn Browser>,
        sources: Arc<Sources>,
        repo: Arc<Repository>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            browser,
            sources,
            repo,
            dispatcher,
        }
    }

    /// Runs one scan. Never fails: every per-source and per-subscriber error
    /// is contained here so the scheduler keeps ticking regardless.
    pub async fn run_scan(&self) {
        debug!("Starting listing scan.");

        // One rendering session is shared by all sources and released by drop
        // on every path out of this function.
        let ctx = match self.browser.acquire().await {
            Ok(ctx) => ctx,
            Err(e) => {
                error!("Could not acquire a rendering session, skipping scan: {e}");
                return;
            }
        };

        // A single snapshot of the active subscribers is used for the whole
        // scan; (un)subscribes that land mid-scan take effect next tick.
        let chat_ids = match self.repo.subscriber.select_active_chat_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                error!("Could not load active subscribers, skipping scan: {e}");
                return;
            }
        };
        if chat_ids.is_empty() {
            debug!("No active subscribers, nothing to scan for.");
            return;
        }

        let batches = self.fetch_all_sources(ctx.as_ref()).await;

        for chat_id in &chat_ids {
            for (source_name, listings) in &batches {
                for listing in listings {
                    if let Err(e) = self.dispatcher.notify(chat_id, listing, source_name).await {
                        error!(
                            "Skipping notification of chat {chat_id} for {}: {e}",
                            listing.link
                        );
                    }
                }
            }
        }

        debug!("Listing scan finished.");
    }

    /// Fetches every registered source in turn. A failing source is logged
    /// and contributes nothing; it never takes the other sources down.
    async fn fetch_all_sources(&self, ctx: &dyn RenderContext) -> Vec<(String, Vec<Listing>)> {
        let mut batches = Vec::new();
        for source in self.sources.get_all_sources() {
            let name = source.get_base().info.name.clone();
            match source.fetch_listings(ctx).await {
                Ok(listings) => {
                    info!("Source {name} returned {} listings.", listings.len());
                    batches.push((name, listings));
                }
                Err(e) => {
                    error!("Source {name} failed, contributing no listings this scan: {e}");
                }
            }
        }
        batches
    }
}
