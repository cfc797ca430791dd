//! Source registry and management.

use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::source::ListingSource;
use crate::source::avby_source::AvBySource;
use crate::source::kufar_source::KufarSource;

/// Registry of all listing sources scanned each tick.
pub struct Sources {
    sources: Vec<Arc<dyn ListingSource>>,
}

impl Sources {
    /// Creates the registry with all supported sites.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let mut sources = Self {
            sources: Vec::new(),
        };
        sources.add_source(Arc::new(KufarSource::new(config)?));
        sources.add_source(Arc::new(AvBySource::new(config)?));
        Ok(sources)
    }

    /// Creates an empty registry.
    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Adds a source to the registry.
    pub fn add_source(&mut self, source: Arc<dyn ListingSource>) {
        self.sources.push(source);
    }

    /// Returns all registered sources, in scan order.
    pub fn get_all_sources(&self) -> &[Arc<dyn ListingSource>] {
        &self.sources
    }
}
