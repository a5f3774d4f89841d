//! Flat-file journal persistence. The JSON file is the sole durable copy
//! and is rewritten wholesale on every mutating action; there is no
//! incremental append and no locking (single-user, single-instance).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;

use crate::config::DEFAULT_STARTING_BALANCE;
use crate::error::{JournalError, Result};
use crate::models::TradeRecord;
use crate::store::normalize;

#[derive(Debug, Clone)]
pub struct JournalData {
    pub trades: Vec<TradeRecord>,
    pub account_balance: f64,
}

impl Default for JournalData {
    fn default() -> Self {
        JournalData {
            trades: Vec::new(),
            account_balance: DEFAULT_STARTING_BALANCE,
        }
    }
}

#[derive(Serialize)]
struct JournalFile<'a> {
    trades: &'a [TradeRecord],
    account_balance: f64,
}

pub struct JournalStore {
    path: PathBuf,
}

impl JournalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JournalStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the journal file with the full trade list and balance.
    pub fn save(&self, trades: &[TradeRecord], account_balance: f64) -> Result<()> {
        let payload = serde_json::to_vec_pretty(&JournalFile {
            trades,
            account_balance,
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, payload)?;
        Ok(())
    }

    /// Read the whole journal. A missing file yields an empty journal with
    /// the default starting balance; an unparseable file yields
    /// [`JournalError::Corrupted`] so the caller can offer recovery.
    pub fn load(&self) -> Result<JournalData> {
        if !self.path.exists() {
            log::info!(
                "No journal at {}; starting with an empty journal",
                self.path.display()
            );
            return Ok(JournalData::default());
        }

        let data = fs::read_to_string(&self.path)?;
        let value: serde_json::Value =
            serde_json::from_str(&data).map_err(|e| JournalError::Corrupted(e.to_string()))?;

        Ok(normalize::journal_from_value(value))
    }

    /// Recovery path for a corrupted journal: rename the existing file to
    /// a timestamped backup and persist a fresh empty journal. Returns the
    /// backup path, or None when there was nothing to back up.
    pub fn backup_and_reset(&self) -> Result<Option<PathBuf>> {
        let backup = if self.path.exists() {
            let stamp = Local::now().format("%Y%m%d_%H%M%S");
            let backup = PathBuf::from(format!("{}.bak_{}", self.path.display(), stamp));
            fs::rename(&self.path, &backup)?;
            log::warn!("Corrupted journal backed up as {}", backup.display());
            Some(backup)
        } else {
            None
        };

        let fresh = JournalData::default();
        self.save(&fresh.trades, fresh.account_balance)?;
        Ok(backup)
    }
}
