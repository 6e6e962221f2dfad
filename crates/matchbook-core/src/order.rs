//! Internal order representation used inside the order book.

use std::fmt;

use crate::messages::AddOrder;
use crate::side::Side;

/// Opaque fixed-width trader identifier carried on every order.
///
/// Has no effect on matching; it exists so downstream consumers can
/// attribute executions. Input tokens longer than eight bytes are
/// truncated, shorter ones are NUL-padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TraderTag([u8; 8]);

impl TraderTag {
    pub fn new(tag: &str) -> Self {
        let mut bytes = [0u8; 8];
        for (dst, src) in bytes.iter_mut().zip(tag.bytes()) {
            *dst = src;
        }
        TraderTag(bytes)
    }

    /// The tag text with trailing padding removed.
    pub fn as_str(&self) -> &str {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(self.0.len());
        std::str::from_utf8(&self.0[..end]).unwrap_or("")
    }
}

impl fmt::Display for TraderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single order in the book.
///
/// `quantity` is the remaining unfilled quantity and is decremented in
/// place on partial fills; an order whose quantity reaches zero never
/// stays in the book.
#[derive(Debug, Clone)]
pub struct Order {
    pub order_id: u64,
    pub side: Side,
    pub price: u32,
    pub quantity: u32,
    pub timestamp: u64,
    pub trader: TraderTag,
}

impl Order {
    /// Build the engine-internal order from an add command.
    pub fn from_add(msg: &AddOrder) -> Self {
        Order {
            order_id: msg.order_id,
            side: msg.side,
            price: msg.price,
            quantity: msg.quantity,
            timestamp: msg.timestamp,
            trader: msg.trader,
        }
    }

    /// Returns `true` if the order is fully filled.
    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }

    /// Fill the order by up to `qty` units, returning the quantity that
    /// was actually filled (`<= qty` and `<= quantity`).
    pub fn fill(&mut self, qty: u32) -> u32 {
        let filled = qty.min(self.quantity);
        self.quantity -= filled;
        filled
    }
}
