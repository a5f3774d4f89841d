//! CSV export of the review table, one row per trade with the derived
//! summary columns.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::journal::JournalSession;
use crate::stats::{self, fmt_usd};

const HEADER: [&str; 17] = [
    "ID",
    "Symbol",
    "Type",
    "Date",
    "Time",
    "Entry Price",
    "Lot Size",
    "SL Price",
    "TP Price",
    "Setup",
    "Entry",
    "Outcome",
    "Total Pips",
    "W/L",
    "Profit ($)",
    "Gain (%)",
    "SL to BE",
];

/// Write every trade as a CSV row. Returns the number of rows written.
pub fn export_trades_csv<W: Write>(session: &JournalSession, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    let instrument = session.instrument();
    let mut rows = 0;
    for trade in session.trades() {
        let summary = stats::summarize(instrument, trade);
        let gain_pct = summary
            .gain_pct
            .map(|pct| format!("{pct:.2}%"))
            .unwrap_or_default();

        let record = [
            trade.id.clone(),
            trade.symbol.clone(),
            trade.direction().as_str().to_string(),
            trade.info.trade_date.clone(),
            trade.info.trade_time.clone(),
            format!("{:.2}", trade.info.entry_price),
            format!("{}", trade.info.lot_size),
            format!("{:.2}", trade.info.sl_price),
            format!("{:.2}", trade.info.tp_price),
            trade.info.setup.clone(),
            trade.info.entry.clone(),
            trade.review.outcome.as_str().to_string(),
            format!("{:.1}", summary.pips),
            summary.result.as_str().to_string(),
            fmt_usd(summary.pnl),
            gain_pct,
            if trade.sl_to_be { "Yes" } else { "No" }.to_string(),
        ];
        csv_writer.write_record(&record)?;
        rows += 1;
    }

    csv_writer.flush()?;
    Ok(rows)
}

pub fn export_trades_csv_file(session: &JournalSession, path: impl AsRef<Path>) -> Result<usize> {
    let file = File::create(path.as_ref())?;
    let rows = export_trades_csv(session, file)?;
    log::info!(
        "Exported {rows} trades to {}",
        path.as_ref().display()
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::trades::{CloseTradeInput, CreateTradeInput, close_trade, create_trade};
    use crate::config::Instrument;
    use crate::journal::RecoveryPolicy;
    use crate::models::{Direction, Outcome, Screenshots};
    use crate::pricing::LevelInput;
    use crate::store::{JournalStore, PlaybookStore};
    use tempfile::tempdir;

    #[test]
    fn test_export_rows_match_trades() {
        let dir = tempdir().unwrap();
        let mut session = JournalSession::open(
            JournalStore::new(dir.path().join("trades_journal.json")),
            PlaybookStore::new(dir.path().join("playbook_data")),
            Instrument::XAUUSD,
            RecoveryPolicy::Abort,
        )
        .unwrap();

        let id = create_trade(
            &mut session,
            CreateTradeInput {
                symbol: "XAUUSD".to_string(),
                timeframe: "4h".to_string(),
                direction: Direction::Buy,
                trade_date: "2024-01-15".to_string(),
                trade_time: "13:30".to_string(),
                timezone: "UTC".to_string(),
                entry_price: 2300.0,
                lot_size: 1.0,
                stop_loss: LevelInput::Pips(50.0),
                sl_reason: "Structure".to_string(),
                take_profit: LevelInput::Pips(100.0),
                tp_reason: "RR Ratio".to_string(),
                setup: "Breakout".to_string(),
                entry_style: "Market".to_string(),
                screenshots: Screenshots::default(),
            },
        )
        .unwrap();
        close_trade(
            &mut session,
            &id,
            CloseTradeInput {
                outcome: Outcome::TakeProfitHit,
                ..Default::default()
            },
        )
        .unwrap();

        let mut buf = Vec::new();
        let rows = export_trades_csv(&session, &mut buf).unwrap();
        assert_eq!(rows, 1);

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("ID,Symbol,Type"));
        let row = lines.next().unwrap();
        assert!(row.contains("XAUUSD"));
        assert!(row.contains("Take Profit Hit"));
        assert!(row.contains("Win"));
        assert!(row.contains("\"$1,000.00\""));
        assert!(row.contains("10.00%"));
    }
}
