//! Storage layer
//!
//! Two independent slots back the quote store:
//!
//! - **Durable**: the full quote collection, surviving restarts
//! - **Session**: the last shown quote, cleared when the login session ends
//!
//! Both treat missing or unparsable data as "nothing stored".

pub mod error;
pub mod persistence;
pub mod session;

pub use error::{StorageError, StorageResult};
pub use persistence::QuotePersistence;
pub use session::SessionSlot;
