//! The journal session: the single owner of the in-memory trade list and
//! account balance. Every operation goes through it, and each mutation
//! queues a change event a UI layer can drain after the action completes
//! instead of holding canonical state itself.

use crate::config::Instrument;
use crate::error::{JournalError, Result};
use crate::models::{Category, TradeRecord};
use crate::store::{CategoryOptions, JournalData, JournalStore, PlaybookStore};

/// What changed during the last operation. Events accumulate until the
/// caller drains them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    TradesChanged,
    BalanceChanged,
    PlaybookChanged(Category),
}

/// What to do when the journal file turns out to be corrupted at open:
/// back it up and start empty, or refuse to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryPolicy {
    BackupAndReset,
    Abort,
}

pub struct JournalSession {
    pub(crate) store: JournalStore,
    pub(crate) playbook: PlaybookStore,
    pub(crate) instrument: Instrument,
    pub(crate) trades: Vec<TradeRecord>,
    pub(crate) account_balance: f64,
    pub(crate) events: Vec<ChangeEvent>,
}

impl JournalSession {
    /// Open the journal, applying the recovery policy if the file is
    /// corrupted.
    pub fn open(
        store: JournalStore,
        playbook: PlaybookStore,
        instrument: Instrument,
        recovery: RecoveryPolicy,
    ) -> Result<Self> {
        let data = match store.load() {
            Ok(data) => data,
            Err(JournalError::Corrupted(reason)) => match recovery {
                RecoveryPolicy::BackupAndReset => {
                    log::warn!("Journal file is corrupted ({reason}); backing up and resetting");
                    store.backup_and_reset()?;
                    JournalData::default()
                }
                RecoveryPolicy::Abort => return Err(JournalError::Corrupted(reason)),
            },
            Err(e) => return Err(e),
        };

        log::info!(
            "Opened journal with {} trades, balance {:.2}",
            data.trades.len(),
            data.account_balance
        );

        Ok(JournalSession {
            store,
            playbook,
            instrument,
            trades: data.trades,
            account_balance: data.account_balance,
            events: Vec::new(),
        })
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    pub fn account_balance(&self) -> f64 {
        self.account_balance
    }

    pub fn trade(&self, id: &str) -> Option<&TradeRecord> {
        self.trades.iter().find(|t| t.id == id)
    }

    pub(crate) fn trade_mut(&mut self, id: &str) -> Option<&mut TradeRecord> {
        self.trades.iter_mut().find(|t| t.id == id)
    }

    /// Explicit user override of the account balance.
    pub fn set_balance(&mut self, amount: f64) -> Result<()> {
        if !amount.is_finite() {
            return Err(JournalError::InvalidInput(
                "Please enter a valid number for the balance.".to_string(),
            ));
        }
        self.account_balance = amount;
        self.persist()?;
        self.push_event(ChangeEvent::BalanceChanged);
        Ok(())
    }

    /// Load one playbook category, seeding or recovering its file as
    /// needed.
    pub fn playbook_options(&self, category: Category) -> Result<CategoryOptions> {
        self.playbook.load_or_create(category)
    }

    /// Rewrite the journal file from the in-memory state.
    pub(crate) fn persist(&self) -> Result<()> {
        self.store.save(&self.trades, self.account_balance)
    }

    pub(crate) fn push_event(&mut self, event: ChangeEvent) {
        self.events.push(event);
    }

    /// Take the accumulated change events, leaving the queue empty.
    pub fn drain_events(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn open_session(dir: &std::path::Path) -> JournalSession {
        JournalSession::open(
            JournalStore::new(dir.join("trades_journal.json")),
            PlaybookStore::new(dir.join("playbook_data")),
            Instrument::XAUUSD,
            RecoveryPolicy::BackupAndReset,
        )
        .unwrap()
    }

    #[test]
    fn test_open_empty_journal() {
        let dir = tempdir().unwrap();
        let session = open_session(dir.path());
        assert!(session.trades().is_empty());
        assert_eq!(session.account_balance(), 10_000.00);
    }

    #[test]
    fn test_set_balance_persists_and_notifies() {
        let dir = tempdir().unwrap();
        let mut session = open_session(dir.path());

        session.set_balance(25_000.0).unwrap();
        assert_eq!(session.drain_events(), vec![ChangeEvent::BalanceChanged]);
        assert!(session.drain_events().is_empty());

        let reopened = open_session(dir.path());
        assert_eq!(reopened.account_balance(), 25_000.0);
    }

    #[test]
    fn test_corrupt_journal_backup_and_reset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trades_journal.json");
        fs::write(&path, "{broken").unwrap();

        let session = open_session(dir.path());
        assert!(session.trades().is_empty());

        let backups: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".bak_"))
            .collect();
        assert_eq!(backups.len(), 1);
    }

    #[test]
    fn test_corrupt_journal_abort() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trades_journal.json");
        fs::write(&path, "{broken").unwrap();

        let result = JournalSession::open(
            JournalStore::new(&path),
            PlaybookStore::new(dir.path().join("playbook_data")),
            Instrument::XAUUSD,
            RecoveryPolicy::Abort,
        );
        assert!(matches!(result, Err(JournalError::Corrupted(_))));
        // The file is left untouched for manual inspection.
        assert_eq!(fs::read_to_string(&path).unwrap(), "{broken");
    }

    #[test]
    fn test_invalid_balance_rejected() {
        let dir = tempdir().unwrap();
        let mut session = open_session(dir.path());
        assert!(session.set_balance(f64::NAN).is_err());
        assert_eq!(session.account_balance(), 10_000.00);
    }
}
