//! CSV command codec.
//!
//! Input format (one command per line; blank lines and `#` comments are
//! skipped):
//!
//! - Add:
//!   `A, timestamp(int), orderId(int), side(char B or S), price(int), quantity(int), trader(string)`
//!
//! - Cancel:
//!   `C, timestamp(int), orderId(int)`
//!
//! Output format:
//!
//! - Trade:
//!   `T, buyOrderId, sellOrderId, price, quantity, timestamp`
//!
//! - Book side summary:
//!   `B, side(B/S), price, totalQuantity` — or `B, side, -, -` when the
//!   side is empty.
//!
//! Malformed lines (wrong field count, non-numeric fields, unknown side
//! marker, zero price or quantity) parse to `None` and never reach the
//! engine.

use matchbook_core::{AddOrder, CancelOrder, Command, Side, TopOfBook, Trade, TraderTag};

/// Parse a single CSV line into a [`Command`].
///
/// Returns `None` for blank lines, comments (starting with `#`), and
/// malformed input.
pub fn parse_command_line(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let tokens = split_and_trim(trimmed, ',');
    match tokens.first().map(String::as_str) {
        Some("A") => parse_add(&tokens),
        Some("C") => parse_cancel(&tokens),
        _ => None,
    }
}

fn parse_add(tokens: &[String]) -> Option<Command> {
    // A, timestamp, orderId, side, price, quantity, trader
    if tokens.len() != 7 {
        return None;
    }

    let timestamp = tokens[1].parse::<u64>().ok()?;
    let order_id = tokens[2].parse::<u64>().ok()?;
    let side = Side::from_char(tokens[3].chars().next()?)?;
    let price = tokens[4].parse::<u32>().ok()?;
    let quantity = tokens[5].parse::<u32>().ok()?;

    // Zero-quantity or zero-price adds are malformed, not no-ops.
    if price == 0 || quantity == 0 {
        return None;
    }

    let trader = TraderTag::new(&tokens[6]);

    Some(Command::Add(AddOrder {
        timestamp,
        order_id,
        side,
        price,
        quantity,
        trader,
    }))
}

fn parse_cancel(tokens: &[String]) -> Option<Command> {
    // C, timestamp, orderId
    if tokens.len() != 3 {
        return None;
    }

    let timestamp = tokens[1].parse::<u64>().ok()?;
    let order_id = tokens[2].parse::<u64>().ok()?;

    Some(Command::Cancel(CancelOrder {
        timestamp,
        order_id,
    }))
}

/// Format a [`Trade`] as a CSV line.
pub fn format_trade(trade: &Trade) -> String {
    format!(
        "T, {}, {}, {}, {}, {}",
        trade.buy_order_id,
        trade.sell_order_id,
        trade.price,
        trade.quantity,
        trade.timestamp
    )
}

/// Render one side of a book summary.
pub fn format_book_side(side: Side, price: Option<u32>, quantity: u32) -> String {
    match price {
        Some(p) => format!("B, {}, {}, {}", side.as_char(), p, quantity),
        None => format!("B, {}, -, -", side.as_char()),
    }
}

/// Render a top-of-book snapshot as one line per side.
pub fn format_top_of_book(tob: &TopOfBook) -> [String; 2] {
    [
        format_book_side(Side::Buy, tob.bid_price, tob.bid_quantity),
        format_book_side(Side::Sell, tob.ask_price, tob.ask_quantity),
    ]
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn split_and_trim(s: &str, delimiter: char) -> Vec<String> {
    s.split(delimiter)
        .map(|tok| tok.trim().to_string())
        .collect()
}
