use serde::{Deserialize, Serialize};

/// Per-instrument conversion parameters. These are fixed at configuration
/// time; the user never edits them at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Price units per pip.
    pub pip_value: f64,
    /// Account-currency value of one pip for a one-lot position.
    pub usd_per_pip_per_lot: f64,
}

impl Instrument {
    pub const XAUUSD: Instrument = Instrument {
        pip_value: 0.1,
        usd_per_pip_per_lot: 10.0,
    };
}

impl Default for Instrument {
    fn default() -> Self {
        Instrument::XAUUSD
    }
}

pub const DEFAULT_STARTING_BALANCE: f64 = 10_000.00;

/// Journal file name inside the data directory.
pub const TRADES_FILE: &str = "trades_journal.json";

/// Directory holding the per-category playbook files.
pub const PLAYBOOK_DIR: &str = "playbook_data";

pub const TIMEFRAME_ENTRIES: [&str; 5] = ["15m", "30m", "1h", "4h", "1d"];

pub const COMMON_TIMEZONES: [&str; 5] = [
    "UTC",
    "US/Eastern",
    "Europe/London",
    "Asia/Tokyo",
    "Australia/Sydney",
];

// Seed lists written to the playbook files on first use.
pub const DEFAULT_SL_REASONS: &[&str] = &["Below Support", "ATR Stop", "Structure", "Other"];

pub const DEFAULT_TP_REASONS: &[&str] = &["At Resistance", "RR Ratio", "Previous High", "Other"];

pub const DEFAULT_SETUPS: &[&str] = &[
    "Breakout",
    "Reversal",
    "Pullback",
    "Trend Continuation",
    "Range",
    "News Play",
    "Other",
];

pub const DEFAULT_ENTRIES: &[&str] = &["Market", "Limit", "Stop", "Break-Even", "Retest", "Other"];

pub const DEFAULT_PARTIAL_CLOSE_REASONS: &[&str] = &[
    "",
    "Reached Partial TP 1",
    "Reached Partial TP 2",
    "Minor Support/Resistance Hit",
    "Candle Closed Against Me",
    "Volatility Spike",
    "News Event Approaching",
    "Time Based Exit",
    "Price Action Shift",
    "Manual Intervention",
    "Other",
];
