//! Single-instrument order book with price-time priority.
//!
//! - Bids: `BTreeMap` keyed by price; best bid = highest key.
//! - Asks: `BTreeMap` keyed by price; best ask = lowest key.
//! - FIFO within each price level, threaded through a shared slab arena
//!   so removal by handle is O(1) from any queue position.
//!
//! Level lookup and creation are O(log P) in the number of distinct
//! price levels; no operation scans all resting orders.

use std::collections::BTreeMap;

use slab::Slab;

use crate::order::Order;
use crate::order_index::OrderIndex;
use crate::price_level::{Handle, OrderNode, PriceLevel};
use crate::side::Side;
use crate::top_of_book::TopOfBook;

/// Single-instrument order book.
#[derive(Debug, Default)]
pub struct OrderBook {
    bids: BTreeMap<u32, PriceLevel>,
    asks: BTreeMap<u32, PriceLevel>,

    /// All resting orders, both sides. Slot indices are the stable
    /// handles stored in the order index.
    arena: Slab<OrderNode>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the order arena so steady-state processing does not
    /// reallocate.
    pub fn with_capacity(orders: usize) -> Self {
        OrderBook {
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            arena: Slab::with_capacity(orders),
        }
    }

    fn levels(&self, side: Side) -> &BTreeMap<u32, PriceLevel> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    /// Insert a resting order at the tail of its price level, creating
    /// the level if absent. Returns the order's stable handle.
    pub fn insert(&mut self, order: Order) -> Handle {
        debug_assert!(order.quantity > 0, "resting order with zero quantity");
        let side = order.side;
        let price = order.price;

        let handle = self.arena.insert(OrderNode::new(order));
        let levels = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        levels
            .entry(price)
            .or_default()
            .push_back(&mut self.arena, handle);
        handle
    }

    /// Remove the order at `handle` from its level in O(1), dropping the
    /// level if it empties, and return the order.
    ///
    /// Panics if the stated location does not hold a resting order: the
    /// index and the book disagreeing is a bug, never a runtime
    /// condition to recover from.
    pub fn remove_at(&mut self, side: Side, price: u32, handle: Handle) -> Order {
        debug_assert_eq!(self.arena[handle].order.side, side);
        debug_assert_eq!(self.arena[handle].order.price, price);

        let levels = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        let level = levels
            .get_mut(&price)
            .expect("no price level at indexed location");
        level.unlink(&mut self.arena, handle);
        if level.is_empty() {
            levels.remove(&price);
        }
        self.arena.remove(handle).order
    }

    /// Decrement a resting order's quantity after a partial fill.
    pub fn reduce(&mut self, handle: Handle, qty: u32) {
        let (side, price) = {
            let node = &mut self.arena[handle];
            debug_assert!(
                qty < node.order.quantity,
                "full fills must remove the order, not reduce it"
            );
            node.order.quantity -= qty;
            (node.order.side, node.order.price)
        };
        let levels = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        levels
            .get_mut(&price)
            .expect("resting order outside any price level")
            .reduce(qty);
    }

    /// Best price on `side`: highest bid or lowest ask.
    pub fn best_price(&self, side: Side) -> Option<u32> {
        match side {
            Side::Buy => self.bids.keys().next_back().copied(),
            Side::Sell => self.asks.keys().next().copied(),
        }
    }

    /// Best price on the side an order of `side` would match against.
    pub fn best_opposite(&self, side: Side) -> Option<u32> {
        self.best_price(side.opposite())
    }

    /// FIFO head of the level at `(side, price)`, if the level exists.
    pub fn front_at(&self, side: Side, price: u32) -> Option<Handle> {
        self.levels(side).get(&price).and_then(PriceLevel::front)
    }

    /// Read access to a resting order by handle.
    pub fn order(&self, handle: Handle) -> &Order {
        &self.arena[handle].order
    }

    /// Aggregate resting quantity at `(side, price)`; 0 if no level.
    pub fn depth_at(&self, side: Side, price: u32) -> u32 {
        self.levels(side)
            .get(&price)
            .map_or(0, PriceLevel::total_quantity)
    }

    /// Number of resting orders across both sides.
    pub fn order_count(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Snapshot of the current best bid and ask.
    pub fn top_of_book(&self) -> TopOfBook {
        let bid_price = self.best_price(Side::Buy);
        let ask_price = self.best_price(Side::Sell);
        TopOfBook {
            bid_price,
            bid_quantity: bid_price.map_or(0, |p| self.depth_at(Side::Buy, p)),
            ask_price,
            ask_quantity: ask_price.map_or(0, |p| self.depth_at(Side::Sell, p)),
        }
    }

    /// Full-scan audit of book/index agreement: every resting order is
    /// indexed at its actual location and vice versa, no level is empty,
    /// no resting order has zero quantity, level totals add up.
    ///
    /// Panics on any disagreement. Intended for tests and debugging, not
    /// the hot path.
    pub fn check_invariants(&self, index: &OrderIndex) {
        let mut seen = 0usize;
        for side in [Side::Buy, Side::Sell] {
            for (&price, level) in self.levels(side) {
                assert!(!level.is_empty(), "empty level resting at {price}");
                let mut total = 0u32;
                for handle in level.iter(&self.arena) {
                    let order = &self.arena[handle].order;
                    assert!(
                        order.quantity > 0,
                        "order {} resting with zero quantity",
                        order.order_id
                    );
                    assert_eq!(order.side, side);
                    assert_eq!(order.price, price);

                    let location = index.lookup(order.order_id).unwrap_or_else(|| {
                        panic!("order {} resting without an index entry", order.order_id)
                    });
                    assert_eq!(location.side, side);
                    assert_eq!(location.price, price);
                    assert_eq!(location.handle, handle);

                    total += order.quantity;
                    seen += 1;
                }
                assert_eq!(
                    total,
                    level.total_quantity(),
                    "level total out of sync at {price}"
                );
            }
        }
        assert_eq!(seen, index.len(), "index entries for orders not in the book");
        assert_eq!(seen, self.arena.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::TraderTag;

    fn order(order_id: u64, side: Side, price: u32, quantity: u32) -> Order {
        Order {
            order_id,
            side,
            price,
            quantity,
            timestamp: order_id,
            trader: TraderTag::new("T1"),
        }
    }

    #[test]
    fn best_prices_per_side() {
        let mut book = OrderBook::new();
        book.insert(order(1, Side::Buy, 99, 10));
        book.insert(order(2, Side::Buy, 101, 10));
        book.insert(order(3, Side::Sell, 105, 10));
        book.insert(order(4, Side::Sell, 103, 10));

        assert_eq!(book.best_price(Side::Buy), Some(101));
        assert_eq!(book.best_price(Side::Sell), Some(103));
        assert_eq!(book.best_opposite(Side::Buy), Some(103));
        assert_eq!(book.best_opposite(Side::Sell), Some(101));
    }

    #[test]
    fn remove_at_drops_empty_level() {
        let mut book = OrderBook::new();
        let h = book.insert(order(1, Side::Buy, 100, 10));
        assert_eq!(book.depth_at(Side::Buy, 100), 10);

        let removed = book.remove_at(Side::Buy, 100, h);
        assert_eq!(removed.order_id, 1);
        assert_eq!(book.best_price(Side::Buy), None);
        assert_eq!(book.depth_at(Side::Buy, 100), 0);
        assert!(book.is_empty());
    }

    #[test]
    fn reduce_updates_depth() {
        let mut book = OrderBook::new();
        let h = book.insert(order(1, Side::Sell, 100, 10));
        book.insert(order(2, Side::Sell, 100, 5));

        book.reduce(h, 4);
        assert_eq!(book.depth_at(Side::Sell, 100), 11);
        assert_eq!(book.order(h).quantity, 6);
        assert_eq!(book.order_count(), 2);
    }

    #[test]
    fn front_is_oldest_at_price() {
        let mut book = OrderBook::new();
        let h1 = book.insert(order(1, Side::Buy, 100, 10));
        book.insert(order(2, Side::Buy, 100, 10));

        assert_eq!(book.front_at(Side::Buy, 100), Some(h1));
        book.remove_at(Side::Buy, 100, h1);
        let h2 = book.front_at(Side::Buy, 100).unwrap();
        assert_eq!(book.order(h2).order_id, 2);
    }

    #[test]
    fn top_of_book_snapshot() {
        let mut book = OrderBook::new();
        assert!(book.top_of_book().is_empty());

        book.insert(order(1, Side::Buy, 100, 10));
        book.insert(order(2, Side::Buy, 100, 5));
        book.insert(order(3, Side::Sell, 104, 7));

        let tob = book.top_of_book();
        assert_eq!(tob.bid_price, Some(100));
        assert_eq!(tob.bid_quantity, 15);
        assert_eq!(tob.ask_price, Some(104));
        assert_eq!(tob.ask_quantity, 7);
    }
}
