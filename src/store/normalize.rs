//! Migration from JSON-as-read to canonical records. Older journals are
//! missing fields added later; every backfill lives here with its default,
//! run once at load, instead of scattered fallback checks.
//!
//! Defaults per field:
//! - trade `id`: generated (`TRADE-...`) when absent
//! - `symbol` / `timeframe` / string info fields: ""
//! - numeric info fields: 0.0
//! - `trade_type`: Buy
//! - screenshot slots: empty (no path)
//! - review fields: "" / open outcome; an unrecognized outcome string
//!   becomes "Other"
//! - partial close `reason_for_close`: legacy `notes` field, then ""
//! - partial close `pips` / `pnl`: 0.0
//! - `sl_to_be`: false
//! - `account_balance`: the default starting balance

use serde_json::{Map, Value};

use crate::config::DEFAULT_STARTING_BALANCE;
use crate::models::{
    Direction, Outcome, PartialClose, Review, ScreenshotSlot, Screenshots, TradeInfo, TradeRecord,
    new_trade_id,
};
use crate::store::journal::JournalData;

pub fn journal_from_value(value: Value) -> JournalData {
    let account_balance = value
        .get("account_balance")
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_STARTING_BALANCE);

    let trades = value
        .get("trades")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(trade_from_value).collect())
        .unwrap_or_default();

    JournalData {
        trades,
        account_balance,
    }
}

/// Canonicalize one trade. Entries that are not JSON objects are dropped
/// with a warning rather than failing the whole load.
pub fn trade_from_value(value: &Value) -> Option<TradeRecord> {
    let Some(obj) = value.as_object() else {
        log::warn!("Skipping non-object trade entry in journal file");
        return None;
    };

    let id = match str_field(obj, "id") {
        id if id.is_empty() => new_trade_id(),
        id => id,
    };

    Some(TradeRecord {
        id,
        symbol: str_field(obj, "symbol"),
        timeframe: str_field(obj, "timeframe"),
        info: info_from_value(obj.get("info")),
        tf_screenshots: screenshots_from_value(obj.get("tf_screenshots")),
        review: review_from_value(obj.get("review")),
        partial_closes: partial_closes_from_value(obj.get("partial_closes")),
        sl_to_be: obj.get("sl_to_be").and_then(Value::as_bool).unwrap_or(false),
    })
}

fn info_from_value(value: Option<&Value>) -> TradeInfo {
    let empty = Map::new();
    let obj = value.and_then(Value::as_object).unwrap_or(&empty);

    TradeInfo {
        trade_type: direction_field(obj, "trade_type"),
        trade_date: str_field(obj, "trade_date"),
        trade_time: str_field(obj, "trade_time"),
        timezone: str_field(obj, "timezone"),
        market_session: str_field(obj, "market_session"),
        entry_price: num_field(obj, "entry_price"),
        lot_size: num_field(obj, "lot_size"),
        sl_pips: num_field(obj, "sl_pips"),
        sl_price: num_field(obj, "sl_price"),
        sl_reason: str_field(obj, "sl_reason"),
        tp_pips: num_field(obj, "tp_pips"),
        tp_price: num_field(obj, "tp_price"),
        tp_reason: str_field(obj, "tp_reason"),
        setup: str_field(obj, "setup"),
        entry: str_field(obj, "entry"),
        account_balance: num_field(obj, "account_balance"),
    }
}

fn screenshots_from_value(value: Option<&Value>) -> Screenshots {
    let empty = Map::new();
    let obj = value.and_then(Value::as_object).unwrap_or(&empty);

    let slot = |key: &str| -> ScreenshotSlot {
        let empty = Map::new();
        let slot = obj.get(key).and_then(Value::as_object).unwrap_or(&empty);
        ScreenshotSlot {
            before: slot
                .get("before")
                .and_then(Value::as_str)
                .map(str::to_string),
            after: slot.get("after").and_then(Value::as_str).map(str::to_string),
        }
    };

    Screenshots {
        d1: slot("D1"),
        h4: slot("H4"),
        h1: slot("H1"),
    }
}

fn review_from_value(value: Option<&Value>) -> Review {
    let empty = Map::new();
    let obj = value.and_then(Value::as_object).unwrap_or(&empty);

    Review {
        outcome: outcome_field(obj, "outcome"),
        price: text_field(obj, "price"),
        notes: str_field(obj, "notes"),
        exit_time: str_field(obj, "exit_time"),
        max_drawdown_pips: text_field(obj, "max_drawdown_pips"),
    }
}

fn partial_closes_from_value(value: Option<&Value>) -> Vec<PartialClose> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let Some(obj) = entry.as_object() else {
                log::warn!("Skipping non-object partial close entry");
                return None;
            };

            // Journals written before reason_for_close existed carried a
            // free-form notes field instead.
            let reason_for_close = match obj.get("reason_for_close").and_then(Value::as_str) {
                Some(reason) => reason.to_string(),
                None => str_field(obj, "notes"),
            };

            Some(PartialClose {
                timestamp: str_field(obj, "timestamp"),
                amount: num_field(obj, "amount"),
                price: num_field(obj, "price"),
                pips: num_field(obj, "pips"),
                reason_for_close,
                pnl: num_field(obj, "pnl"),
            })
        })
        .collect()
}

fn str_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// String field that tolerates a stray numeric value.
fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Numeric field that tolerates a numeric string.
fn num_field(obj: &Map<String, Value>, key: &str) -> f64 {
    match obj.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn direction_field(obj: &Map<String, Value>, key: &str) -> Direction {
    match obj.get(key).and_then(Value::as_str) {
        Some("Sell") => Direction::Sell,
        _ => Direction::Buy,
    }
}

fn outcome_field(obj: &Map<String, Value>, key: &str) -> Outcome {
    match obj.get(key).and_then(Value::as_str) {
        None | Some("") => Outcome::None,
        Some("Take Profit Hit") => Outcome::TakeProfitHit,
        Some("Stoploss Hit") => Outcome::StoplossHit,
        Some("Breakeven") => Outcome::Breakeven,
        Some("Other") => Outcome::Other,
        Some(other) => {
            log::warn!("Unrecognized outcome '{other}'; treating as Other");
            Outcome::Other
        }
    }
}
