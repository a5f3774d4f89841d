pub mod commands;
pub mod config;
pub mod error;
pub mod journal;
pub mod market;
pub mod models;
pub mod pricing;
pub mod stats;
pub mod store;

pub use config::Instrument;
pub use error::{JournalError, Result};
pub use journal::{ChangeEvent, JournalSession, RecoveryPolicy};
pub use store::{JournalStore, PlaybookStore};
