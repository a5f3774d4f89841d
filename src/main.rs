use std::path::PathBuf;

use anyhow::Context;

use trade_journal_lib::commands;
use trade_journal_lib::config;
use trade_journal_lib::stats::fmt_usd;
use trade_journal_lib::{Instrument, JournalSession, JournalStore, PlaybookStore, RecoveryPolicy};

/// Open the journal in the given directory (default: the current one) and
/// print the review table and stats bar.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let session = JournalSession::open(
        JournalStore::new(data_dir.join(config::TRADES_FILE)),
        PlaybookStore::new(data_dir.join(config::PLAYBOOK_DIR)),
        Instrument::XAUUSD,
        RecoveryPolicy::BackupAndReset,
    )
    .with_context(|| format!("failed to open journal in {}", data_dir.display()))?;

    for (idx, (trade, summary)) in commands::trade_summaries(&session).iter().enumerate() {
        let outcome = match trade.review.outcome.as_str() {
            "" => "Open",
            outcome => outcome,
        };
        println!(
            "{:>3}  {:<8} {:<4} {:<10} {:>5}  {:>10.2} {:>6}  {:>9} pips  {:>12}  {:<9} {}",
            idx + 1,
            trade.symbol,
            trade.direction().as_str(),
            trade.info.trade_date,
            trade.info.trade_time,
            trade.info.entry_price,
            trade.info.lot_size,
            format!("{:.1}", summary.pips),
            fmt_usd(summary.pnl),
            summary.result.as_str(),
            outcome,
        );
    }

    let dashboard = commands::dashboard_stats(&session);
    println!("{}", dashboard.stats_line());
    println!("Account Balance: {}", fmt_usd(session.account_balance()));

    Ok(())
}
