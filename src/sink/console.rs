//! Terminal output backend.

use std::io::Write;

use crate::filter::FilterChain;
use crate::record::LogRecord;
use crate::sink::Sink;

/// Writes records to stdout, one line each:
/// `<timestamp> [<LEVEL>] <message> (<source>)`.
pub struct ConsoleSink {
    color: bool,
    chain: FilterChain,
}

impl ConsoleSink {
    /// `color` wraps the level name in its ANSI color.
    pub fn new(color: bool) -> Self {
        Self {
            color,
            chain: FilterChain::new(),
        }
    }
}

impl Sink for ConsoleSink {
    fn chain(&self) -> &FilterChain {
        &self.chain
    }

    fn chain_mut(&mut self) -> &mut FilterChain {
        &mut self.chain
    }

    fn write(&mut self, record: &LogRecord) {
        let level = if self.color {
            record.level.colored_name()
        } else {
            record.level.as_str().to_string()
        };

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let _ = writeln!(
            out,
            "{:9.5} [{}] {} ({})",
            record.timestamp,
            level,
            record.message,
            record.display_source()
        );
    }
}
