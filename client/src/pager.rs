//! Pagination over the catalog listing.
//!
//! The pager owns the offset/limit pair and the last reported total.  Each
//! call to [`Pager::load_more`] fetches one page, enriches it and hands the
//! new cards back in listing order.  Failures leave the position untouched;
//! there is no automatic retry.

use std::sync::Arc;

use tracing::{debug, info};

use pokedeck_common::card::CardRecord;
use pokedeck_common::config::Config;

use crate::adapter::{enrich_page, EnrichOptions};
use crate::api::CatalogSource;
use crate::error::ClientError;

pub struct Pager<S: ?Sized> {
    source: Arc<S>,
    opts: EnrichOptions,
    limit: u32,
    offset: u64,
    /// Total reported by the last page; unknown until the first load.
    count: Option<u64>,
    loaded: u64,
}

impl<S> Pager<S>
where
    S: CatalogSource + ?Sized + 'static,
{
    pub fn new(source: Arc<S>, limit: u32, opts: EnrichOptions) -> Self {
        Pager {
            source,
            opts,
            limit: limit.max(1),
            offset: 0,
            count: None,
            loaded: 0,
        }
    }

    pub fn from_config(source: Arc<S>, config: &Config) -> Self {
        Self::new(source, config.page_size, EnrichOptions::from_config(config))
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn count(&self) -> Option<u64> {
        self.count
    }

    /// Records appended so far.
    pub fn loaded(&self) -> u64 {
        self.loaded
    }

    pub fn has_more(&self) -> bool {
        self.count.map_or(true, |c| self.loaded < c)
    }

    /// Fetch and enrich the next page.  Returns an empty batch once the
    /// catalog is exhausted.
    pub async fn load_more(&mut self) -> Result<Vec<CardRecord>, ClientError> {
        if !self.has_more() {
            debug!("Catalog exhausted at {} records – nothing to load", self.loaded);
            return Ok(Vec::new());
        }

        let page = self.source.list(self.limit, self.offset).await?;
        let cards = enrich_page(&self.source, &page.results, &self.opts).await;

        self.offset += u64::from(self.limit);
        self.loaded += cards.len() as u64;
        self.count = Some(if cards.is_empty() {
            // An empty page before the advertised end would loop forever.
            self.loaded
        } else {
            page.count
        });

        info!(
            "Loaded {} card(s) ({} of {})",
            cards.len(),
            self.loaded,
            page.count
        );
        Ok(cards)
    }
}
