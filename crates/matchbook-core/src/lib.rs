//! matchbook-core
//!
//! Pure matching engine logic for a single instrument:
//! - command and trade types
//! - order representation
//! - price levels and the order book
//! - order id index
//! - price-time-priority matching engine

pub mod side;
pub mod order;
pub mod messages;
pub mod price_level;
pub mod order_book;
pub mod order_index;
pub mod matching_engine;
pub mod top_of_book;

pub use side::Side;
pub use order::{Order, TraderTag};

pub use messages::{
    AddOrder,
    CancelOrder,
    CancelStatus,
    Command,
    Trade,
    TradeSink,
};

pub use price_level::{Handle, PriceLevel};
pub use order_book::OrderBook;
pub use order_index::{Location, OrderIndex};
pub use matching_engine::MatchingEngine;
pub use top_of_book::TopOfBook;
