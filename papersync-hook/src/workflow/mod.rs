//! Per-webhook sync workflow

pub mod paper_sync;

pub use paper_sync::{PaperSync, SyncError, SyncOutcome};
