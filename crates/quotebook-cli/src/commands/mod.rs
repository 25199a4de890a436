//! Command handlers

pub mod config;
pub mod quote;
pub mod status;
pub mod sync;
pub mod transfer;
pub mod watch;
