use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Trade direction as recorded on the entry form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Buy,
    Sell,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Buy => "Buy",
            Direction::Sell => "Sell",
        }
    }
}

/// Final review outcome. `None` (serialized as "") means the trade is
/// still open; every other value is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "Take Profit Hit")]
    TakeProfitHit,
    #[serde(rename = "Stoploss Hit")]
    StoplossHit,
    #[serde(rename = "Breakeven")]
    Breakeven,
    #[serde(rename = "Other")]
    Other,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::None)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::None => "",
            Outcome::TakeProfitHit => "Take Profit Hit",
            Outcome::StoplossHit => "Stoploss Hit",
            Outcome::Breakeven => "Breakeven",
            Outcome::Other => "Other",
        }
    }
}

/// Entry-time snapshot. Set once when the trade is created; never mutated
/// afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeInfo {
    #[serde(default)]
    pub trade_type: Direction,
    #[serde(default)]
    pub trade_date: String,
    #[serde(default)]
    pub trade_time: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub market_session: String,
    #[serde(default)]
    pub entry_price: f64,
    #[serde(default)]
    pub lot_size: f64,
    #[serde(default)]
    pub sl_pips: f64,
    #[serde(default)]
    pub sl_price: f64,
    #[serde(default)]
    pub sl_reason: String,
    #[serde(default)]
    pub tp_pips: f64,
    #[serde(default)]
    pub tp_price: f64,
    #[serde(default)]
    pub tp_reason: String,
    #[serde(default)]
    pub setup: String,
    #[serde(default)]
    pub entry: String,
    /// Account balance when the trade was taken; gain% is computed
    /// against this figure, not the current balance.
    #[serde(default)]
    pub account_balance: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenshotSlot {
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub after: Option<String>,
}

/// Chart screenshot paths for the fixed D1/H4/H1 set. The journal stores
/// paths only; a missing file degrades to a placeholder at display time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Screenshots {
    #[serde(rename = "D1", default)]
    pub d1: ScreenshotSlot,
    #[serde(rename = "H4", default)]
    pub h4: ScreenshotSlot,
    #[serde(rename = "H1", default)]
    pub h1: ScreenshotSlot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotTimeframe {
    D1,
    H4,
    H1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotSlot {
    Before,
    After,
}

impl Screenshots {
    fn slot(&self, tf: ShotTimeframe) -> &ScreenshotSlot {
        match tf {
            ShotTimeframe::D1 => &self.d1,
            ShotTimeframe::H4 => &self.h4,
            ShotTimeframe::H1 => &self.h1,
        }
    }

    fn slot_mut(&mut self, tf: ShotTimeframe) -> &mut ScreenshotSlot {
        match tf {
            ShotTimeframe::D1 => &mut self.d1,
            ShotTimeframe::H4 => &mut self.h4,
            ShotTimeframe::H1 => &mut self.h1,
        }
    }

    pub fn get(&self, tf: ShotTimeframe, when: ShotSlot) -> Option<&str> {
        let slot = self.slot(tf);
        match when {
            ShotSlot::Before => slot.before.as_deref(),
            ShotSlot::After => slot.after.as_deref(),
        }
    }

    pub fn set(&mut self, tf: ShotTimeframe, when: ShotSlot, path: Option<String>) {
        let slot = self.slot_mut(tf);
        match when {
            ShotSlot::Before => slot.before = path,
            ShotSlot::After => slot.after = path,
        }
    }
}

/// Close-time review. `price` and `max_drawdown_pips` stay strings in the
/// persisted format (older journals hold ""); use the typed accessors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub outcome: Outcome,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub exit_time: String,
    #[serde(default)]
    pub max_drawdown_pips: String,
}

impl Review {
    pub fn close_price(&self) -> Option<f64> {
        self.price.trim().parse().ok()
    }

    pub fn drawdown_pips(&self) -> Option<f64> {
        self.max_drawdown_pips.trim().parse().ok()
    }
}

/// One partial close of an open position. Appended in chronological order;
/// the log is never reordered or rewritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialClose {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub pips: f64,
    #[serde(default)]
    pub reason_for_close: String,
    #[serde(default)]
    pub pnl: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub timeframe: String,
    #[serde(default)]
    pub info: TradeInfo,
    #[serde(default)]
    pub tf_screenshots: Screenshots,
    #[serde(default)]
    pub review: Review,
    #[serde(default)]
    pub partial_closes: Vec<PartialClose>,
    #[serde(default)]
    pub sl_to_be: bool,
}

impl TradeRecord {
    pub fn is_open(&self) -> bool {
        self.review.outcome == Outcome::None
    }

    pub fn direction(&self) -> Direction {
        self.info.trade_type
    }

    /// Lots already taken off through partial closes.
    pub fn closed_lots(&self) -> f64 {
        self.partial_closes.iter().map(|pc| pc.amount).sum()
    }

    pub fn remaining_lots(&self) -> f64 {
        self.info.lot_size - self.closed_lots()
    }
}

pub fn new_trade_id() -> String {
    format!(
        "TRADE-{}-{}",
        Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4()
    )
}
