//! Review-side aggregation: per-trade summary figures and journal-wide
//! dashboard stats. Nothing here mutates a trade.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::config::Instrument;
use crate::models::{Outcome, TradeRecord};
use crate::pricing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeResult {
    Open,
    Win,
    Loss,
    Breakeven,
}

impl TradeResult {
    pub fn as_str(self) -> &'static str {
        match self {
            TradeResult::Open => "Open",
            TradeResult::Win => "Win",
            TradeResult::Loss => "Loss",
            TradeResult::Breakeven => "Breakeven",
        }
    }
}

/// Display figures for one trade: realized partials plus the projected
/// final leg when the trade has a terminal outcome.
#[derive(Debug, Clone)]
pub struct TradeSummary {
    /// Realized + final-leg P&L in account currency.
    pub pnl: f64,
    pub pips: f64,
    pub remaining_lots: f64,
    pub result: TradeResult,
    /// P&L as a percentage of the balance at entry; None when that
    /// balance was zero.
    pub gain_pct: Option<f64>,
    pub balance_after: f64,
    pub drawdown_usd: Option<f64>,
    pub time_in_trade_minutes: Option<i64>,
}

/// Compute the summary figures for a trade without mutating it.
///
/// The Win/Loss/Breakeven classification comes strictly from the sign of
/// the total P&L, not from the recorded outcome; a terminal outcome whose
/// close price does not parse leaves the classification at Open and adds
/// no final leg.
pub fn summarize(instrument: Instrument, trade: &TradeRecord) -> TradeSummary {
    let mut pnl = 0.0;
    let mut pips = 0.0;
    for pc in &trade.partial_closes {
        pnl += pc.pnl;
        pips += pc.pips;
    }

    let remaining_lots = trade.remaining_lots();
    let mut result = TradeResult::Open;

    if trade.review.outcome.is_terminal() {
        if let Some(close_price) = trade.review.close_price() {
            if remaining_lots > 0.0 {
                let moved = pricing::pips_moved(
                    instrument,
                    trade.info.entry_price,
                    close_price,
                    trade.direction(),
                );
                pips += moved;
                pnl += pricing::pnl_usd(instrument, moved, remaining_lots);
            }
            result = if pnl > 0.0 {
                TradeResult::Win
            } else if pnl < 0.0 {
                TradeResult::Loss
            } else {
                TradeResult::Breakeven
            };
        }
    }

    let gain_pct = if trade.info.account_balance > 0.0 {
        Some(pnl / trade.info.account_balance * 100.0)
    } else {
        None
    };

    let drawdown_usd = trade
        .review
        .drawdown_pips()
        .map(|dd| pricing::pnl_usd(instrument, dd, trade.info.lot_size));

    TradeSummary {
        pnl,
        pips,
        remaining_lots,
        result,
        gain_pct,
        balance_after: trade.info.account_balance + pnl,
        drawdown_usd,
        time_in_trade_minutes: time_in_trade(trade),
    }
}

/// Minutes between entry and exit time. The exit time carries no date, so
/// an exit earlier than the entry time wraps to the next day.
fn time_in_trade(trade: &TradeRecord) -> Option<i64> {
    if trade.info.trade_date.is_empty()
        || trade.info.trade_time.is_empty()
        || trade.review.exit_time.is_empty()
    {
        return None;
    }
    let start = NaiveDateTime::parse_from_str(
        &format!("{} {}", trade.info.trade_date, trade.info.trade_time),
        "%Y-%m-%d %H:%M",
    )
    .ok()?;
    let end = NaiveDateTime::parse_from_str(
        &format!("{} {}", trade.info.trade_date, trade.review.exit_time),
        "%Y-%m-%d %H:%M",
    )
    .ok()?;

    let duration = end - start;
    let duration = if duration < Duration::zero() {
        duration + Duration::days(1)
    } else {
        duration
    };
    Some(duration.num_minutes())
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    /// Percentage rounded to the nearest integer; 0 when there are no
    /// trades.
    pub win_rate: i64,
    /// Realized + projected P&L over every trade.
    pub total_pnl: f64,
}

impl DashboardStats {
    /// The one-line journal header, e.g.
    /// `Trade Count 3  Win 1  Loss 1  33%WR | Realized P&L: $1,000.00`.
    pub fn stats_line(&self) -> String {
        format!(
            "Trade Count {}  Win {}  Loss {}  {}%WR | Realized P&L: {}",
            self.total_trades,
            self.wins,
            self.losses,
            self.win_rate,
            fmt_usd(self.total_pnl)
        )
    }
}

/// Journal-wide aggregates. Wins count only "Take Profit Hit" outcomes and
/// losses only "Stoploss Hit"; the per-trade sign classification is a
/// separate, stricter measure.
pub fn dashboard_stats(instrument: Instrument, trades: &[TradeRecord]) -> DashboardStats {
    let total_trades = trades.len();
    let wins = trades
        .iter()
        .filter(|t| t.review.outcome == Outcome::TakeProfitHit)
        .count();
    let losses = trades
        .iter()
        .filter(|t| t.review.outcome == Outcome::StoplossHit)
        .count();
    let win_rate = if total_trades > 0 {
        (100.0 * wins as f64 / total_trades as f64).round() as i64
    } else {
        0
    };
    let total_pnl = trades
        .iter()
        .map(|t| summarize(instrument, t).pnl)
        .sum();

    DashboardStats {
        total_trades,
        wins,
        losses,
        win_rate,
        total_pnl,
    }
}

/// Format a dollar amount with thousands separators: `$1,234.56`,
/// `$-1,234.56`.
pub fn fmt_usd(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("${sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PartialClose, Review};

    const XAU: Instrument = Instrument::XAUUSD;

    fn buy_trade(entry: f64, lots: f64) -> TradeRecord {
        let mut trade = TradeRecord::default();
        trade.info.entry_price = entry;
        trade.info.lot_size = lots;
        trade.info.account_balance = 10_000.0;
        trade
    }

    #[test]
    fn test_win_from_pnl_sign() {
        // Buy at 2300, lot 1.0, closed at 2310 -> 100 pips, $1000, Win.
        let mut trade = buy_trade(2300.0, 1.0);
        trade.review = Review {
            outcome: Outcome::Other,
            price: "2310.0".to_string(),
            ..Default::default()
        };

        let summary = summarize(XAU, &trade);
        assert!((summary.pips - 100.0).abs() < 1e-9);
        assert!((summary.pnl - 1000.0).abs() < 1e-9);
        assert_eq!(summary.result, TradeResult::Win);
        assert!((summary.balance_after - 11_000.0).abs() < 1e-9);
        assert!((summary.gain_pct.unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_partials_plus_final_leg() {
        let mut trade = buy_trade(2300.0, 1.0);
        trade.partial_closes.push(PartialClose {
            amount: 0.5,
            price: 2305.0,
            pips: 50.0,
            pnl: 250.0,
            ..Default::default()
        });
        trade.review = Review {
            outcome: Outcome::TakeProfitHit,
            price: "2310.00".to_string(),
            ..Default::default()
        };

        let summary = summarize(XAU, &trade);
        // Final leg: 100 pips on the remaining 0.5 lots = $500.
        assert!((summary.remaining_lots - 0.5).abs() < 1e-9);
        assert!((summary.pnl - 750.0).abs() < 1e-9);
        assert!((summary.pips - 150.0).abs() < 1e-9);
        assert_eq!(summary.result, TradeResult::Win);
    }

    #[test]
    fn test_fully_scaled_out_trade_adds_no_final_leg() {
        let mut trade = buy_trade(2300.0, 1.0);
        trade.partial_closes.push(PartialClose {
            amount: 1.0,
            pips: -20.0,
            pnl: -200.0,
            ..Default::default()
        });
        trade.review = Review {
            outcome: Outcome::Other,
            price: "2400.00".to_string(),
            ..Default::default()
        };

        let summary = summarize(XAU, &trade);
        assert!((summary.pnl + 200.0).abs() < 1e-9);
        assert_eq!(summary.result, TradeResult::Loss);
    }

    #[test]
    fn test_open_trade_stays_open() {
        let trade = buy_trade(2300.0, 1.0);
        let summary = summarize(XAU, &trade);
        assert_eq!(summary.result, TradeResult::Open);
        assert_eq!(summary.pnl, 0.0);
    }

    #[test]
    fn test_unparseable_close_price_skips_final_leg() {
        let mut trade = buy_trade(2300.0, 1.0);
        trade.review.outcome = Outcome::Other;
        trade.review.price = "".to_string();
        let summary = summarize(XAU, &trade);
        assert_eq!(summary.result, TradeResult::Open);
        assert_eq!(summary.pnl, 0.0);
    }

    #[test]
    fn test_gain_pct_empty_on_zero_balance() {
        let mut trade = buy_trade(2300.0, 1.0);
        trade.info.account_balance = 0.0;
        trade.review = Review {
            outcome: Outcome::Breakeven,
            price: "2300.00".to_string(),
            ..Default::default()
        };
        let summary = summarize(XAU, &trade);
        assert_eq!(summary.gain_pct, None);
        assert_eq!(summary.result, TradeResult::Breakeven);
    }

    #[test]
    fn test_drawdown_in_dollars() {
        let mut trade = buy_trade(2300.0, 2.0);
        trade.review.max_drawdown_pips = "15.0".to_string();
        let summary = summarize(XAU, &trade);
        assert!((summary.drawdown_usd.unwrap() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_time_in_trade_wraps_past_midnight() {
        let mut trade = buy_trade(2300.0, 1.0);
        trade.info.trade_date = "2024-01-15".to_string();
        trade.info.trade_time = "23:30".to_string();
        trade.review.exit_time = "01:00".to_string();
        let summary = summarize(XAU, &trade);
        assert_eq!(summary.time_in_trade_minutes, Some(90));
    }

    #[test]
    fn test_win_rate_rounds() {
        assert_eq!(dashboard_stats(XAU, &[]).win_rate, 0);

        let mut winner = buy_trade(2300.0, 1.0);
        winner.review = Review {
            outcome: Outcome::TakeProfitHit,
            price: "2310.00".to_string(),
            ..Default::default()
        };
        let mut loser = buy_trade(2300.0, 1.0);
        loser.review = Review {
            outcome: Outcome::StoplossHit,
            price: "2295.00".to_string(),
            ..Default::default()
        };
        let open = buy_trade(2300.0, 1.0);

        let stats = dashboard_stats(XAU, &[winner, loser, open]);
        assert_eq!(stats.total_trades, 3);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.win_rate, 33);
        // $1000 win, $500 loss.
        assert!((stats.total_pnl - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_fmt_usd_groups_thousands() {
        assert_eq!(fmt_usd(0.0), "$0.00");
        assert_eq!(fmt_usd(1234.5), "$1,234.50");
        assert_eq!(fmt_usd(-1234567.891), "$-1,234,567.89");
        assert_eq!(fmt_usd(999.99), "$999.99");
    }
}
