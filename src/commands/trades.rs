//! Trade lifecycle operations: create, annotate, partially close, close.
//! Each operation validates its input, mutates the session, persists the
//! journal wholesale and queues a change event. On error nothing is
//! committed.

use chrono::Local;

use crate::error::{JournalError, Result};
use crate::journal::{ChangeEvent, JournalSession};
use crate::market;
use crate::models::{
    Direction, Outcome, PartialClose, Review, Screenshots, ShotSlot, ShotTimeframe, TradeRecord,
    new_trade_id,
};
use crate::pricing::{self, LevelInput, Role};
use crate::stats::{self, TradeSummary};

// Tolerance when checking a partial amount against the remaining lots.
const LOT_EPSILON: f64 = 1e-4;

#[derive(Debug, Clone)]
pub struct CreateTradeInput {
    pub symbol: String,
    /// Chart timeframe; defaults to "1h" when left empty.
    pub timeframe: String,
    pub direction: Direction,
    pub trade_date: String,
    pub trade_time: String,
    pub timezone: String,
    pub entry_price: f64,
    pub lot_size: f64,
    pub stop_loss: LevelInput,
    pub sl_reason: String,
    pub take_profit: LevelInput,
    pub tp_reason: String,
    pub setup: String,
    pub entry_style: String,
    pub screenshots: Screenshots,
}

/// Record a new trade. The SL/TP levels arrive as whichever field the user
/// edited last; the counterpart is derived here, once, and both are frozen
/// into the entry snapshot together with the session label and the current
/// account balance.
pub fn create_trade(session: &mut JournalSession, input: CreateTradeInput) -> Result<String> {
    if !(input.entry_price > 0.0) {
        return Err(JournalError::InvalidInput(
            "Entry price must be a positive number.".to_string(),
        ));
    }
    if !(input.lot_size > 0.0) {
        return Err(JournalError::InvalidInput(
            "Lot size must be a positive number.".to_string(),
        ));
    }

    let instrument = session.instrument();
    let direction = input.direction;
    let entry = input.entry_price;

    let sl_pips = input
        .stop_loss
        .pips(instrument, entry, direction, Role::StopLoss);
    let sl_price = pricing::round2(
        input
            .stop_loss
            .price(instrument, entry, direction, Role::StopLoss),
    );
    let tp_pips = input
        .take_profit
        .pips(instrument, entry, direction, Role::TakeProfit);
    let tp_price = pricing::round2(
        input
            .take_profit
            .price(instrument, entry, direction, Role::TakeProfit),
    );

    let market_session =
        market::classify(&input.trade_date, &input.trade_time, &input.timezone).label();

    let id = new_trade_id();
    let mut trade = TradeRecord {
        id: id.clone(),
        symbol: input.symbol,
        timeframe: if input.timeframe.is_empty() {
            "1h".to_string()
        } else {
            input.timeframe
        },
        tf_screenshots: input.screenshots,
        ..Default::default()
    };
    trade.info.trade_type = direction;
    trade.info.trade_date = input.trade_date;
    trade.info.trade_time = input.trade_time;
    trade.info.timezone = input.timezone;
    trade.info.market_session = market_session;
    trade.info.entry_price = entry;
    trade.info.lot_size = input.lot_size;
    trade.info.sl_pips = sl_pips;
    trade.info.sl_price = sl_price;
    trade.info.sl_reason = input.sl_reason;
    trade.info.tp_pips = tp_pips;
    trade.info.tp_price = tp_price;
    trade.info.tp_reason = input.tp_reason;
    trade.info.setup = input.setup;
    trade.info.entry = input.entry_style;
    trade.info.account_balance = session.account_balance();

    log::info!("Recording trade {id} ({} {})", trade.symbol, direction.as_str());

    session.trades.push(trade);
    session.persist()?;
    session.push_event(ChangeEvent::TradesChanged);
    Ok(id)
}

/// Attach or replace a chart screenshot path. Pass None to clear the slot.
/// Only the path is stored; whether the file exists is a display concern.
pub fn attach_screenshot(
    session: &mut JournalSession,
    id: &str,
    timeframe: ShotTimeframe,
    slot: ShotSlot,
    path: Option<String>,
) -> Result<()> {
    let trade = session
        .trade_mut(id)
        .ok_or_else(|| JournalError::TradeNotFound(id.to_string()))?;

    trade.tf_screenshots.set(timeframe, slot, path);
    session.persist()?;
    session.push_event(ChangeEvent::TradesChanged);
    Ok(())
}

/// Take part of the position off. The level is pips or price, close-sense
/// (positive pips = favorable move); the counterpart and the realized P&L
/// are computed here. The partial log is append-only.
pub fn add_partial_close(
    session: &mut JournalSession,
    id: &str,
    amount: f64,
    level: LevelInput,
    reason_for_close: &str,
) -> Result<PartialClose> {
    let instrument = session.instrument();
    let trade = session
        .trade(id)
        .ok_or_else(|| JournalError::TradeNotFound(id.to_string()))?;

    let entry = trade.info.entry_price;
    let direction = trade.direction();

    let pips = match level {
        LevelInput::Pips(pips) => pips,
        LevelInput::Price(price) if price > 0.0 => {
            pricing::round1(pricing::pips_moved(instrument, entry, price, direction))
        }
        LevelInput::Price(_) => 0.0,
    };
    let price = match level {
        LevelInput::Price(price) => price,
        LevelInput::Pips(pips) => pricing::round2(pricing::price_from_pips(
            instrument,
            entry,
            pips,
            direction,
            Role::TakeProfit,
        )),
    };

    if amount <= 0.0 || (price == 0.0 && pips == 0.0) {
        return Err(JournalError::InvalidInput(
            "Amount must be positive and Price/Pips must not be zero for partial close."
                .to_string(),
        ));
    }

    let remaining = trade.remaining_lots();
    if amount > remaining + LOT_EPSILON {
        return Err(JournalError::ExceedsRemainingLots {
            requested: amount,
            remaining,
        });
    }

    let reason_for_close = reason_for_close.trim();
    if reason_for_close.is_empty() {
        return Err(JournalError::InvalidInput(
            "Please select a reason for the partial close.".to_string(),
        ));
    }

    let partial = PartialClose {
        timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        amount,
        price,
        pips,
        reason_for_close: reason_for_close.to_string(),
        pnl: pricing::pnl_usd(instrument, pips, amount),
    };

    let trade = session
        .trade_mut(id)
        .ok_or_else(|| JournalError::TradeNotFound(id.to_string()))?;
    trade.partial_closes.push(partial.clone());

    session.persist()?;
    session.push_event(ChangeEvent::TradesChanged);
    Ok(partial)
}

#[derive(Debug, Clone, Default)]
pub struct CloseTradeInput {
    pub outcome: Outcome,
    /// Required for Outcome::Other; for the other terminal outcomes the
    /// close price is derived from the entry snapshot and this field is
    /// ignored.
    pub price: Option<f64>,
    pub exit_time: String,
    pub notes: String,
    /// Max adverse excursion, as pips or as the drawdown price. A price on
    /// the favorable side clamps to zero pips.
    pub max_drawdown: Option<LevelInput>,
    pub sl_to_be: bool,
}

/// Close a trade: persist the review, and apply the trade's total P&L
/// (realized partials plus the final leg on the remaining lots) to the
/// running account balance, exactly once. Re-closing an already-closed
/// trade is rejected so the balance can never absorb the same trade twice.
pub fn close_trade(
    session: &mut JournalSession,
    id: &str,
    input: CloseTradeInput,
) -> Result<TradeSummary> {
    if input.outcome == Outcome::None {
        return Err(JournalError::InvalidInput(
            "An outcome is required to close a trade.".to_string(),
        ));
    }

    let instrument = session.instrument();
    let trade = session
        .trade(id)
        .ok_or_else(|| JournalError::TradeNotFound(id.to_string()))?;
    if !trade.is_open() {
        return Err(JournalError::AlreadyClosed(id.to_string()));
    }

    let close_price = match input.outcome {
        Outcome::TakeProfitHit => trade.info.tp_price,
        Outcome::StoplossHit => trade.info.sl_price,
        Outcome::Breakeven => trade.info.entry_price,
        Outcome::Other => input.price.ok_or_else(|| {
            JournalError::InvalidInput(
                "A final close price is required for an Other outcome.".to_string(),
            )
        })?,
        Outcome::None => unreachable!("rejected above"),
    };

    let max_drawdown_pips = match input.max_drawdown {
        None => String::new(),
        Some(LevelInput::Pips(pips)) => format!("{:.1}", pips.max(0.0)),
        Some(LevelInput::Price(price)) => format!(
            "{:.1}",
            pricing::drawdown_pips_from_price(
                instrument,
                trade.info.entry_price,
                price,
                trade.direction()
            )
        ),
    };

    let trade = session
        .trade_mut(id)
        .ok_or_else(|| JournalError::TradeNotFound(id.to_string()))?;
    trade.review = Review {
        outcome: input.outcome,
        price: format!("{close_price:.2}"),
        notes: input.notes,
        exit_time: input.exit_time,
        max_drawdown_pips,
    };
    trade.sl_to_be = input.sl_to_be;

    let summary = stats::summarize(instrument, trade);
    session.account_balance += summary.pnl;

    log::info!(
        "Closed trade {id}: {} P&L {:.2}, balance {:.2}",
        summary.result.as_str(),
        summary.pnl,
        session.account_balance
    );

    session.persist()?;
    session.push_event(ChangeEvent::TradesChanged);
    session.push_event(ChangeEvent::BalanceChanged);
    Ok(summary)
}
