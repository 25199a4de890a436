//! Quotebook Core Library
//!
//! This crate provides the core functionality for Quotebook, a local quote
//! collection that can be reconciled with a remote source.
//!
//! # Architecture
//!
//! - **Store**: owns the in-memory collection, the single source of truth
//! - **Storage**: durable collection plus a session-scoped "last shown" slot
//! - **Merge / selection / codec**: pure functions over quote slices
//! - **Sync**: push/fetch/merge cycles driven by periodic and manual triggers
//!
//! # Quick Start
//!
//! ```text
//! let mut store = QuoteStore::open()?;
//!
//! // Add a quote
//! store.add_quote(&QuoteDraft::new("Be kind.", "Life"))?;
//!
//! // Show one
//! let quote = store.show_random(&CategoryFilter::parse(Some("life")));
//! ```
//!
//! # Modules
//!
//! - `store`: Quote store (main entry point)
//! - `models`: Quote, identity and input validation
//! - `merge`: Deduplicating merge of remote quotes
//! - `selection`: Random, category-filtered picks
//! - `codec`: JSON import/export
//! - `storage`: Durable and session persistence
//! - `sync`: Remote sync client, cycle, service and status
//! - `config`: Application configuration

pub mod codec;
pub mod config;
pub mod merge;
pub mod models;
pub mod selection;
pub mod storage;
pub mod store;
pub mod sync;

pub use codec::CodecError;
pub use config::Config;
pub use merge::{merge, MergeOutcome};
pub use models::{Quote, QuoteDraft, ValidationError};
pub use selection::{pick, CategoryFilter};
pub use storage::{QuotePersistence, SessionSlot, StorageError};
pub use store::QuoteStore;
