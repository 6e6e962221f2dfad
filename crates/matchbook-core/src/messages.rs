//! Command and trade types crossing the engine boundary.
//!
//! These are transport-agnostic logical messages:
//! - [`Command`]: what the engine consumes.
//! - [`Trade`]: what it produces.
//!
//! Text encoding lives in the `matchbook-protocol` crate; this module
//! is purely logical. Commands arrive fully validated — the parser
//! rejects malformed lines before they get here.

use crate::order::TraderTag;
use crate::side::Side;

/// A single request into the matching engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Add a new limit order.
    Add(AddOrder),

    /// Cancel a resting order by id.
    Cancel(CancelOrder),
}

/// Add-order command (input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOrder {
    /// Arrival stamp, carried through to any trades this order produces.
    pub timestamp: u64,

    /// Caller-assigned order id, never reused within a session.
    pub order_id: u64,

    /// Buy or Sell.
    pub side: Side,

    /// Limit price in integer ticks, strictly positive.
    pub price: u32,

    /// Quantity to trade, strictly positive.
    pub quantity: u32,

    /// Opaque trader attribution, no effect on matching.
    pub trader: TraderTag,
}

/// Cancel command (input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelOrder {
    pub timestamp: u64,
    pub order_id: u64,
}

/// One execution between a buyer and a seller (output).
///
/// The price is always the resting order's price; the timestamp is the
/// aggressor command's. Trades are created by the matching loop, handed
/// to the sink exactly once, and never stored by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trade {
    pub buy_order_id: u64,
    pub sell_order_id: u64,
    pub price: u32,
    pub quantity: u32,
    pub timestamp: u64,
}

/// Outcome of a cancel request.
///
/// `NotFound` is a normal result, not an error: cancels racing with
/// fills and repeated cancels are expected and leave the book untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelStatus {
    Canceled,
    NotFound,
}

/// Receiver for the trade stream emitted by `submit`.
pub trait TradeSink {
    fn on_trade(&mut self, trade: Trade);
}

/// Collecting sink, convenient for tests and batch callers.
impl TradeSink for Vec<Trade> {
    fn on_trade(&mut self, trade: Trade) {
        self.push(trade);
    }
}
