use crate::models::{PropertyListing, SearchFilters};
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for anything that can answer a listing search
/// Matching and ranking happen on the source's side, never locally
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Search listings matching the given filters
    async fn search(&self, query_text: &str, filters: &SearchFilters) -> Result<Vec<PropertyListing>>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}
