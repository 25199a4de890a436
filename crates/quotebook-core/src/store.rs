//! Quote store
//!
//! The `QuoteStore` owns the in-memory quote collection and is the single
//! source of truth during a session. Every mutation goes through it and is
//! written to durable storage right away.
//!
//! ## Mutations
//!
//! All mutations append. If the durable write fails, the appended quotes are
//! dropped again so memory never runs ahead of disk.
//!
//! - `add_quote`: one validated quote, no deduplication
//! - `import_json`: bulk append of a decoded document, no deduplication
//! - `merge_remote`: deduplicated append of remote quotes
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = QuoteStore::open()?;  // Loads or seeds defaults
//!
//! store.add_quote(&QuoteDraft::new("Be kind.", "Life"))?;
//! let shown = store.show_random(&CategoryFilter::All);
//! ```

use anyhow::{Context, Result};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::codec;
use crate::config::Config;
use crate::merge;
use crate::models::{self, Quote, QuoteDraft};
use crate::selection::{self, CategoryFilter};
use crate::storage::{QuotePersistence, SessionSlot};

/// Owner of the quote collection
pub struct QuoteStore {
    /// The collection, in insertion order
    quotes: Vec<Quote>,
    /// Durable storage for the collection
    persistence: QuotePersistence,
    /// Session storage for the last shown quote
    session: SessionSlot,
    /// Configuration
    config: Config,
}

impl QuoteStore {
    /// Open the store using the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the store, seeding the built-in quotes if nothing is stored
    pub fn open_with_config(config: Config) -> Result<Self> {
        Self::open_with_seed(config, models::default_quotes())
    }

    /// Open the store, seeding `seed` if nothing usable is stored
    ///
    /// Corrupted or unwritable storage never blocks startup: the seed is
    /// used in memory and the next successful save persists it.
    pub fn open_with_seed(config: Config, seed: Vec<Quote>) -> Result<Self> {
        let persistence = QuotePersistence::from_config(&config);
        let session = SessionSlot::from_config(&config);

        let quotes = match persistence.load() {
            Some(quotes) => quotes,
            None => {
                info!("No stored quotes, seeding {} defaults", seed.len());
                if let Err(e) = persistence.save(&seed) {
                    warn!("Failed to save default quotes: {}", e);
                }
                seed
            }
        };

        Ok(Self {
            quotes,
            persistence,
            session,
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// All quotes, in insertion order
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Distinct categories, for the category list
    pub fn categories(&self) -> Vec<String> {
        models::categories(&self.quotes)
    }

    /// Quotes passing `filter`, in insertion order
    pub fn quotes_in(&self, filter: &CategoryFilter) -> Vec<&Quote> {
        selection::eligible(&self.quotes, filter)
    }

    // ==================== Mutations ====================

    /// Add a quote from user input
    ///
    /// Incomplete input is rejected with a `ValidationError` and nothing
    /// changes.
    pub fn add_quote(&mut self, draft: &QuoteDraft) -> Result<Quote> {
        let quote = draft.validate()?;
        self.append_and_save(vec![quote.clone()])
            .context("Failed to save new quote")?;
        info!("Added quote in category {:?}", quote.category);
        Ok(quote)
    }

    /// Import quotes from a JSON document
    ///
    /// Decoded quotes are appended as-is, without deduplication. A document
    /// that is not a JSON array is rejected with a `CodecError` and nothing
    /// changes. Returns the number of imported quotes.
    pub fn import_json(&mut self, text: &str) -> Result<usize> {
        let imported = codec::decode(text)?;
        let count = self
            .append_and_save(imported)
            .context("Failed to save imported quotes")?;
        info!("Imported {} quotes", count);
        Ok(count)
    }

    /// Export the collection as a pretty-printed JSON document
    pub fn export_json(&self) -> String {
        codec::encode(&self.quotes)
    }

    /// Merge quotes fetched from the remote source
    ///
    /// Only quotes whose identity is new are appended, and storage is only
    /// written when something was appended. Returns the number appended.
    pub fn merge_remote(&mut self, incoming: Vec<Quote>) -> Result<usize> {
        let before = self.quotes.len();
        let added = merge::merge_into(&mut self.quotes, incoming);

        if added == 0 {
            debug!("Merge found nothing new");
            return Ok(0);
        }

        if let Err(e) = self.persistence.save(&self.quotes) {
            self.quotes.truncate(before);
            return Err(e).context("Failed to save merged quotes");
        }

        info!("Merged {} new quotes from remote", added);
        Ok(added)
    }

    fn append_and_save(&mut self, quotes: Vec<Quote>) -> Result<usize> {
        let before = self.quotes.len();
        self.quotes.extend(quotes);
        let count = self.quotes.len() - before;

        if let Err(e) = self.persistence.save(&self.quotes) {
            self.quotes.truncate(before);
            return Err(e.into());
        }

        Ok(count)
    }

    // ==================== Display ====================

    /// Pick a random quote and remember it as shown
    ///
    /// Returns `None` when no quote matches `filter`.
    pub fn show_random(&mut self, filter: &CategoryFilter) -> Option<Quote> {
        self.show_random_with(filter, &mut rand::thread_rng())
    }

    /// Like [`show_random`](Self::show_random) with a caller-supplied RNG
    pub fn show_random_with<R: Rng + ?Sized>(
        &mut self,
        filter: &CategoryFilter,
        rng: &mut R,
    ) -> Option<Quote> {
        let quote = selection::pick(&self.quotes, filter, rng)?.clone();
        self.remember_shown(&quote);
        Some(quote)
    }

    /// The quote shown last in this session, if any
    pub fn last_shown(&self) -> Option<Quote> {
        self.session.recall()
    }

    /// Restore the last shown quote, or show a fresh random one
    ///
    /// The restored quote must pass `filter`; otherwise a new one is picked.
    pub fn current_or_random(&mut self, filter: &CategoryFilter) -> Option<Quote> {
        match self.last_shown() {
            Some(quote) if filter.accepts(&quote) => Some(quote),
            _ => self.show_random(filter),
        }
    }

    fn remember_shown(&mut self, quote: &Quote) {
        // Losing the session slot only loses the restore-on-start convenience
        if let Err(e) = self.session.remember(quote) {
            warn!("Failed to remember shown quote: {}", e);
        }
    }
}
