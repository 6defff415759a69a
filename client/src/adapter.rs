//! Turns catalog list entries into display cards.
//!
//! Enrichment is best-effort: a failed detail fetch yields the bare card, a
//! failed species fetch only blanks the species fields.  Neither is ever
//! propagated to the caller.

use std::sync::Arc;

use tracing::{debug, warn};

use pokedeck_common::card::{CardDetails, CardRecord};
use pokedeck_common::config::Config;
use pokedeck_common::protocol::NamedResource;

use crate::api::{CatalogSource, ResourceKey};

/// Settings the adapter needs from [`Config`].
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    pub artwork_base_url: String,
    pub locale: String,
    /// When false, cards are built from the list entry alone.
    pub enabled: bool,
}

impl EnrichOptions {
    pub fn from_config(config: &Config) -> Self {
        EnrichOptions {
            artwork_base_url: config.artwork_base_url.clone(),
            locale: config.locale.clone(),
            enabled: config.enrich,
        }
    }
}

/// Build one card, fetching its detail and species records concurrently.
pub async fn enrich_card<S>(source: &S, entry: &NamedResource, opts: &EnrichOptions) -> CardRecord
where
    S: CatalogSource + ?Sized,
{
    let card = CardRecord::from_entry(entry, &opts.artwork_base_url);
    if !opts.enabled {
        return card;
    }
    let Some(key) = ResourceKey::for_card(&card) else {
        warn!("List entry {:?} has neither id nor name – not enriching", entry.url);
        return card;
    };

    let (pokemon, species) = tokio::join!(source.pokemon(&key), source.species(&key));

    let pokemon = match pokemon {
        Ok(p) => p,
        Err(e) => {
            warn!("Detail fetch for {card} failed: {e}");
            return card;
        }
    };
    let species = match species {
        Ok(s) => Some(s),
        // Alternate forms have no species record under their own id.
        Err(e) if e.is_not_found() => {
            debug!("No species record for {card}");
            None
        }
        Err(e) => {
            warn!("Species fetch for {card} failed: {e}");
            None
        }
    };

    let details = CardDetails::from_upstream(Some(&pokemon), species.as_ref(), &opts.locale);
    card.with_details(details)
}

/// Enrich a whole page.  Entries are fetched in parallel; the result keeps
/// the input order regardless of completion order.
pub async fn enrich_page<S>(
    source: &Arc<S>,
    entries: &[NamedResource],
    opts: &EnrichOptions,
) -> Vec<CardRecord>
where
    S: CatalogSource + ?Sized + 'static,
{
    if !opts.enabled {
        return entries
            .iter()
            .map(|e| CardRecord::from_entry(e, &opts.artwork_base_url))
            .collect();
    }

    let handles: Vec<_> = entries
        .iter()
        .map(|entry| {
            let source = Arc::clone(source);
            let entry = entry.clone();
            let opts = opts.clone();
            tokio::spawn(async move { enrich_card(source.as_ref(), &entry, &opts).await })
        })
        .collect();

    let mut cards = Vec::with_capacity(handles.len());
    for (entry, handle) in entries.iter().zip(handles) {
        match handle.await {
            Ok(card) => cards.push(card),
            Err(e) => {
                warn!("Enrichment task for {} aborted: {e}", entry.name);
                cards.push(CardRecord::from_entry(entry, &opts.artwork_base_url));
            }
        }
    }
    cards
}
