//! File output backend.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use tracing::warn;

use crate::filter::FilterChain;
use crate::record::LogRecord;
use crate::sink::{Sink, SinkError};

/// Appends records to a file, one line each, with a wider timestamp field
/// than the console backend (`{:12.8}`).
pub struct FileSink {
    file: File,
    chain: FilterChain,
}

impl FileSink {
    /// Open `path` in append mode, creating it if absent.
    ///
    /// Open failures surface here; write failures after construction are
    /// logged through `tracing` and otherwise swallowed, so a broken disk
    /// never turns a logging call into an error.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self {
            file,
            chain: FilterChain::new(),
        })
    }
}

impl Sink for FileSink {
    fn chain(&self) -> &FilterChain {
        &self.chain
    }

    fn chain_mut(&mut self) -> &mut FilterChain {
        &mut self.chain
    }

    fn write(&mut self, record: &LogRecord) {
        if let Err(e) = writeln!(
            self.file,
            "{:12.8} [{}] {} ({})",
            record.timestamp,
            record.level,
            record.message,
            record.display_source()
        ) {
            warn!(error = %e, "log file write failed");
        }
    }
}
