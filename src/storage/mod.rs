//! Storage layer for spendvault
//!
//! Encrypted vault files with atomic writes, one per user, under a single
//! store directory.

pub mod file_io;
pub mod ledgers;

pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use ledgers::{LedgerStore, LoadReport, SkippedVault};
