use crate::models::Listing;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for all listing scrapers
/// This allows easy addition of new auction sources (Caixa, Itaú, etc) in the future
#[async_trait]
pub trait ScraperTrait: Send + Sync {
    /// Scrape listings from the source
    async fn scrape(&self) -> Result<Vec<Listing>>;

    /// Get the name of the scraper source
    fn source_name(&self) -> &'static str;
}
