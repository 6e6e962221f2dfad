//! CSV replay driver for the matching engine.
//!
//! Reads a command file, applies each command to a fresh engine, and
//! streams the resulting trades to stdout as they happen. Malformed
//! lines and unknown-order cancels are logged, never fatal.

mod config;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};

use matchbook_core::{CancelStatus, Command, MatchingEngine, Trade, TradeSink};
use matchbook_protocol::csv_codec;

use crate::config::Config;

/// Sink that writes each trade as a CSV line the moment it is emitted.
struct TradeWriter<W: Write> {
    out: W,
    emitted: u64,
    failed: Option<io::Error>,
}

impl<W: Write> TradeWriter<W> {
    fn new(out: W) -> Self {
        TradeWriter {
            out,
            emitted: 0,
            failed: None,
        }
    }
}

impl<W: Write> TradeSink for TradeWriter<W> {
    fn on_trade(&mut self, trade: Trade) {
        if self.failed.is_some() {
            return;
        }
        match writeln!(self.out, "{}", csv_codec::format_trade(&trade)) {
            Ok(()) => self.emitted += 1,
            Err(err) => self.failed = Some(err),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env()?;
    let path = std::env::args()
        .nth(1)
        .context("usage: matchbook-replay <commands.csv>")?;

    run(&path, &config)
}

fn run(path: &str, config: &Config) -> Result<()> {
    let file = File::open(path).with_context(|| format!("opening {path}"))?;
    let reader = BufReader::new(file);

    let mut engine = MatchingEngine::with_capacity(config.arena_capacity);
    let stdout = io::stdout();
    let mut sink = TradeWriter::new(BufWriter::new(stdout.lock()));

    let mut applied = 0u64;
    let mut rejected = 0u64;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading {path}"))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match csv_codec::parse_command_line(trimmed) {
            Some(Command::Add(add)) => {
                engine.submit(add, &mut sink);
                applied += 1;
            }
            Some(Command::Cancel(cancel)) => {
                if engine.cancel(cancel.order_id) == CancelStatus::NotFound {
                    warn!(
                        line = line_no + 1,
                        order_id = cancel.order_id,
                        "cancel for unknown order"
                    );
                }
                applied += 1;
            }
            None => {
                warn!(line = line_no + 1, "skipping malformed command");
                rejected += 1;
            }
        }
    }

    if let Some(err) = sink.failed.take() {
        return Err(err).context("writing trade stream");
    }

    if config.show_book {
        for line in csv_codec::format_top_of_book(&engine.top_of_book()) {
            writeln!(sink.out, "{line}").context("writing book summary")?;
        }
    }
    sink.out.flush().context("flushing output")?;

    info!(
        applied,
        rejected,
        trades = sink.emitted,
        resting = engine.order_count(),
        "replay complete"
    );

    Ok(())
}
