//! Read-side queries: dashboard aggregates and the playbook filter panel.

use serde::{Deserialize, Serialize};

use crate::journal::JournalSession;
use crate::models::{Outcome, TradeRecord};
use crate::stats::{self, DashboardStats, TradeSummary};

/// Filter panel criteria. A None field means "any"; string matches are
/// exact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeFilters {
    pub setup: Option<String>,
    pub entry: Option<String>,
    pub market_session: Option<String>,
    pub sl_reason: Option<String>,
    pub tp_reason: Option<String>,
    /// Matches trades with at least one partial close for this reason.
    pub close_reason: Option<String>,
    pub outcome: Option<Outcome>,
    /// Minimum stop-loss distance in pips.
    pub min_sl_pips: Option<f64>,
}

impl TradeFilters {
    fn matches(&self, trade: &TradeRecord) -> bool {
        if let Some(setup) = &self.setup {
            if &trade.info.setup != setup {
                return false;
            }
        }
        if let Some(entry) = &self.entry {
            if &trade.info.entry != entry {
                return false;
            }
        }
        if let Some(session) = &self.market_session {
            if &trade.info.market_session != session {
                return false;
            }
        }
        if let Some(sl_reason) = &self.sl_reason {
            if &trade.info.sl_reason != sl_reason {
                return false;
            }
        }
        if let Some(tp_reason) = &self.tp_reason {
            if &trade.info.tp_reason != tp_reason {
                return false;
            }
        }
        if let Some(close_reason) = &self.close_reason {
            if !trade
                .partial_closes
                .iter()
                .any(|pc| &pc.reason_for_close == close_reason)
            {
                return false;
            }
        }
        if let Some(outcome) = self.outcome {
            if trade.review.outcome != outcome {
                return false;
            }
        }
        if let Some(min_sl_pips) = self.min_sl_pips {
            if trade.info.sl_pips < min_sl_pips {
                return false;
            }
        }
        true
    }
}

pub fn filter_trades<'a>(
    session: &'a JournalSession,
    filters: &TradeFilters,
) -> Vec<&'a TradeRecord> {
    session
        .trades()
        .iter()
        .filter(|t| filters.matches(t))
        .collect()
}

/// The stats bar over the whole journal.
pub fn dashboard_stats(session: &JournalSession) -> DashboardStats {
    stats::dashboard_stats(session.instrument(), session.trades())
}

/// The stats overview over the filtered subset.
pub fn filtered_stats(session: &JournalSession, filters: &TradeFilters) -> DashboardStats {
    let filtered: Vec<TradeRecord> = filter_trades(session, filters)
        .into_iter()
        .cloned()
        .collect();
    stats::dashboard_stats(session.instrument(), &filtered)
}

/// Per-trade display figures in journal order.
pub fn trade_summaries(session: &JournalSession) -> Vec<(&TradeRecord, TradeSummary)> {
    session
        .trades()
        .iter()
        .map(|t| (t, stats::summarize(session.instrument(), t)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::trades::{CloseTradeInput, CreateTradeInput, close_trade, create_trade};
    use crate::config::Instrument;
    use crate::journal::RecoveryPolicy;
    use crate::models::{Direction, Screenshots};
    use crate::pricing::LevelInput;
    use crate::store::{JournalStore, PlaybookStore};
    use tempfile::tempdir;

    fn open_session(dir: &std::path::Path) -> JournalSession {
        JournalSession::open(
            JournalStore::new(dir.join("trades_journal.json")),
            PlaybookStore::new(dir.join("playbook_data")),
            Instrument::XAUUSD,
            RecoveryPolicy::Abort,
        )
        .unwrap()
    }

    fn input(setup: &str, sl_pips: f64) -> CreateTradeInput {
        CreateTradeInput {
            symbol: "XAUUSD".to_string(),
            timeframe: "1h".to_string(),
            direction: Direction::Buy,
            trade_date: "2024-01-15".to_string(),
            trade_time: "09:30".to_string(),
            timezone: "UTC".to_string(),
            entry_price: 2300.0,
            lot_size: 1.0,
            stop_loss: LevelInput::Pips(sl_pips),
            sl_reason: "Below Support".to_string(),
            take_profit: LevelInput::Pips(100.0),
            tp_reason: "At Resistance".to_string(),
            setup: setup.to_string(),
            entry_style: "Market".to_string(),
            screenshots: Screenshots::default(),
        }
    }

    #[test]
    fn test_filters_by_setup_and_sl_size() {
        let dir = tempdir().unwrap();
        let mut session = open_session(dir.path());
        create_trade(&mut session, input("Breakout", 50.0)).unwrap();
        create_trade(&mut session, input("Breakout", 10.0)).unwrap();
        create_trade(&mut session, input("Reversal", 50.0)).unwrap();

        let filters = TradeFilters {
            setup: Some("Breakout".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_trades(&session, &filters).len(), 2);

        let filters = TradeFilters {
            setup: Some("Breakout".to_string()),
            min_sl_pips: Some(20.0),
            ..Default::default()
        };
        assert_eq!(filter_trades(&session, &filters).len(), 1);

        let filters = TradeFilters {
            market_session: Some("London".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_trades(&session, &filters).len(), 3);
    }

    #[test]
    fn test_filtered_stats_only_counts_matching() {
        let dir = tempdir().unwrap();
        let mut session = open_session(dir.path());
        let winner = create_trade(&mut session, input("Breakout", 50.0)).unwrap();
        create_trade(&mut session, input("Reversal", 50.0)).unwrap();

        close_trade(
            &mut session,
            &winner,
            CloseTradeInput {
                outcome: Outcome::TakeProfitHit,
                ..Default::default()
            },
        )
        .unwrap();

        let filters = TradeFilters {
            setup: Some("Breakout".to_string()),
            ..Default::default()
        };
        let stats = filtered_stats(&session, &filters);
        assert_eq!(stats.total_trades, 1);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.win_rate, 100);

        let all = dashboard_stats(&session);
        assert_eq!(all.total_trades, 2);
        assert_eq!(all.win_rate, 50);
    }

    #[test]
    fn test_summaries_keep_journal_order() {
        let dir = tempdir().unwrap();
        let mut session = open_session(dir.path());
        let first = create_trade(&mut session, input("Breakout", 50.0)).unwrap();
        let second = create_trade(&mut session, input("Reversal", 50.0)).unwrap();

        let summaries = trade_summaries(&session);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].0.id, first);
        assert_eq!(summaries[1].0.id, second);
    }
}
