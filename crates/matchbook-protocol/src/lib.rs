//! matchbook-protocol
//!
//! Text encoding for the matching engine: parses the delimited command
//! stream into [`matchbook_core::Command`] values and renders trades
//! and book summaries as output lines.
//!
//! This crate is the boundary where malformed input dies; the engine
//! core never sees a partially populated command.

pub mod csv_codec;

pub use csv_codec::{
    format_book_side,
    format_top_of_book,
    format_trade,
    parse_command_line,
};
