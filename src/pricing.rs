//! Pip/price/P&L conversions. All functions are pure; direction and level
//! role decide the sign, the instrument supplies the scale.

use crate::config::Instrument;
use crate::models::Direction;

/// Which protective level a price belongs to. A stop-loss sits on the
/// adverse side of entry, a take-profit on the favorable side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    StopLoss,
    TakeProfit,
}

/// A level as the user last expressed it. Exactly one representation is
/// authoritative; the other is derived on demand, so the two can never
/// feed back into each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelInput {
    Pips(f64),
    Price(f64),
}

/// +1.0 when `pips` move price up from entry, -1.0 when they move it down.
pub fn level_sign(direction: Direction, role: Role) -> f64 {
    match (direction, role) {
        (Direction::Buy, Role::TakeProfit) | (Direction::Sell, Role::StopLoss) => 1.0,
        _ => -1.0,
    }
}

pub fn price_from_pips(
    instrument: Instrument,
    entry_price: f64,
    pips: f64,
    direction: Direction,
    role: Role,
) -> f64 {
    entry_price + level_sign(direction, role) * pips * instrument.pip_value
}

/// Inverse of [`price_from_pips`], rounded to one decimal place.
pub fn pips_from_price(
    instrument: Instrument,
    entry_price: f64,
    price: f64,
    direction: Direction,
    role: Role,
) -> f64 {
    round1(level_sign(direction, role) * (price - entry_price) / instrument.pip_value)
}

/// Signed pips gained between entry and an exit price: positive when the
/// exit is on the profitable side for the given direction.
pub fn pips_moved(instrument: Instrument, entry_price: f64, price: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Buy => (price - entry_price) / instrument.pip_value,
        Direction::Sell => (entry_price - price) / instrument.pip_value,
    }
}

pub fn pnl_usd(instrument: Instrument, pips: f64, lot_size: f64) -> f64 {
    pips * lot_size * instrument.usd_per_pip_per_lot
}

/// Adverse excursion in pips for a drawdown price. Drawdown sits on the
/// stop-loss side of entry and is never negative.
pub fn drawdown_pips_from_price(
    instrument: Instrument,
    entry_price: f64,
    price: f64,
    direction: Direction,
) -> f64 {
    let pips = level_sign(direction, Role::StopLoss) * (price - entry_price) / instrument.pip_value;
    pips.max(0.0)
}

pub fn drawdown_price_from_pips(
    instrument: Instrument,
    entry_price: f64,
    pips: f64,
    direction: Direction,
) -> f64 {
    entry_price + level_sign(direction, Role::StopLoss) * pips * instrument.pip_value
}

impl LevelInput {
    pub fn pips(self, instrument: Instrument, entry_price: f64, direction: Direction, role: Role) -> f64 {
        match self {
            LevelInput::Pips(pips) => pips,
            LevelInput::Price(price) => pips_from_price(instrument, entry_price, price, direction, role),
        }
    }

    pub fn price(self, instrument: Instrument, entry_price: f64, direction: Direction, role: Role) -> f64 {
        match self {
            LevelInput::Pips(pips) => price_from_pips(instrument, entry_price, pips, direction, role),
            LevelInput::Price(price) => price,
        }
    }
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
