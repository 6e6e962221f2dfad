//! Price-time-priority matching over one order book.
//!
//! Owns the [`OrderBook`] and [`OrderIndex`] for a single instrument
//! and processes a totally ordered command stream:
//! - [`submit`](MatchingEngine::submit) crosses an incoming order
//!   against the opposite side, emitting one [`Trade`] per fill through
//!   the sink, then rests any remainder.
//! - [`cancel`](MatchingEngine::cancel) removes a resting order in O(1)
//!   via its indexed handle; it never trades.
//!
//! Every command runs to completion before the next is accepted. Given
//! an identical command sequence the engine emits identical trades and
//! reaches an identical final book state.

use crate::messages::{AddOrder, CancelStatus, Command, Trade, TradeSink};
use crate::order::Order;
use crate::order_book::OrderBook;
use crate::order_index::{Location, OrderIndex};
use crate::side::Side;
use crate::top_of_book::TopOfBook;

/// Single-instrument matching engine.
#[derive(Debug, Default)]
pub struct MatchingEngine {
    book: OrderBook,
    index: OrderIndex,
}

impl MatchingEngine {
    /// Create a new engine with an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the book arena and index for an expected number of
    /// simultaneously resting orders.
    pub fn with_capacity(orders: usize) -> Self {
        MatchingEngine {
            book: OrderBook::with_capacity(orders),
            index: OrderIndex::with_capacity(orders),
        }
    }

    /// Dispatch a single command. Returns the cancel outcome for cancel
    /// commands, `None` for adds.
    pub fn apply(&mut self, command: Command, sink: &mut impl TradeSink) -> Option<CancelStatus> {
        match command {
            Command::Add(add) => {
                self.submit(add, sink);
                None
            }
            Command::Cancel(cancel) => Some(self.cancel(cancel.order_id)),
        }
    }

    /// Process an incoming order: match against the opposite side at
    /// price-time priority, then rest any remainder on its own side.
    ///
    /// The caller guarantees `quantity > 0`; zero-quantity adds are
    /// malformed input and must be rejected before they reach the
    /// engine.
    pub fn submit(&mut self, add: AddOrder, sink: &mut impl TradeSink) {
        debug_assert!(add.quantity > 0, "zero-quantity add reached the engine");
        debug_assert!(
            !self.index.contains(add.order_id),
            "order id {} reused while still resting",
            add.order_id
        );

        let mut order = Order::from_add(&add);
        self.match_incoming(&mut order, sink);

        if !order.is_filled() {
            let (order_id, side, price) = (order.order_id, order.side, order.price);
            let handle = self.book.insert(order);
            self.index.record(order_id, Location { side, price, handle });
        }
    }

    /// Cancel a resting order by id.
    ///
    /// `NotFound` is a normal outcome for already-filled,
    /// already-canceled, or never-seen ids and leaves the book
    /// untouched, so repeated cancels are safe.
    pub fn cancel(&mut self, order_id: u64) -> CancelStatus {
        match self.index.forget(order_id) {
            Some(location) => {
                self.book
                    .remove_at(location.side, location.price, location.handle);
                CancelStatus::Canceled
            }
            None => CancelStatus::NotFound,
        }
    }

    /// Continuous matching loop.
    ///
    /// One trade per fill; the resting side sets the price; fully filled
    /// resting orders leave the book and the index in the same step. The
    /// loop stops as soon as the best opposite price no longer crosses —
    /// it is the most favorable price remaining, so nothing further can
    /// match.
    fn match_incoming(&mut self, taker: &mut Order, sink: &mut impl TradeSink) {
        let opposite = taker.side.opposite();

        while !taker.is_filled() {
            let Some(best) = self.book.best_price(opposite) else {
                break;
            };
            if !taker.side.crosses(taker.price, best) {
                break;
            }

            let handle = self
                .book
                .front_at(opposite, best)
                .expect("best level present but empty");
            let (maker_id, maker_quantity) = {
                let maker = self.book.order(handle);
                (maker.order_id, maker.quantity)
            };

            let traded = taker.fill(maker_quantity);
            if traded == maker_quantity {
                // Full fill: the resting order is destroyed.
                self.book.remove_at(opposite, best, handle);
                self.index.forget(maker_id);
            } else {
                // Partial fill: the resting order keeps its queue position.
                self.book.reduce(handle, traded);
            }

            let (buy_order_id, sell_order_id) = match taker.side {
                Side::Buy => (taker.order_id, maker_id),
                Side::Sell => (maker_id, taker.order_id),
            };
            sink.on_trade(Trade {
                buy_order_id,
                sell_order_id,
                price: best,
                quantity: traded,
                timestamp: taker.timestamp,
            });
        }
    }

    // -------------------------------------------------------------------------
    // Read-only query surface
    // -------------------------------------------------------------------------

    /// Best (highest) resting bid price.
    pub fn best_bid(&self) -> Option<u32> {
        self.book.best_price(Side::Buy)
    }

    /// Best (lowest) resting ask price.
    pub fn best_ask(&self) -> Option<u32> {
        self.book.best_price(Side::Sell)
    }

    /// Aggregate resting quantity at `(side, price)`.
    pub fn depth_at(&self, side: Side, price: u32) -> u32 {
        self.book.depth_at(side, price)
    }

    /// Whether an order with this id currently rests in the book.
    pub fn contains(&self, order_id: u64) -> bool {
        self.index.contains(order_id)
    }

    /// Number of resting orders across both sides.
    pub fn order_count(&self) -> usize {
        self.book.order_count()
    }

    /// Snapshot of the current best bid and ask.
    pub fn top_of_book(&self) -> TopOfBook {
        self.book.top_of_book()
    }

    /// Audit book/index agreement; panics on any disagreement.
    ///
    /// A failed audit is a bug in the engine, never a runtime condition:
    /// continuing with a corrupted book would silently produce wrong
    /// executions.
    pub fn check_invariants(&self) {
        self.book.check_invariants(&self.index);
    }
}
