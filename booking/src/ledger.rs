//! Append-only booking ledger.
//!
//! One comma-separated line per confirmed booking, newline terminated, no
//! header. The workflow waits for the append before a booking is reported
//! confirmed; an append failure surfaces as a failed booking.

use crate::types::BookingRecord;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Result of a ledger append.
pub type LedgerResult = Result<(), LedgerError>;

/// A ledger append failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("ledger append failed: {0}")]
pub struct LedgerError(pub String);

/// Sink for confirmed booking records.
///
/// Returns `BoxFuture` instead of async fn to stay dyn-compatible
/// (object-safe); the workflow holds ledgers as `Arc<dyn BookingLedger>`.
pub trait BookingLedger: Send + Sync {
    /// Appends one record.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the record could not be written.
    fn append(&self, record: &BookingRecord) -> Pin<Box<dyn Future<Output = LedgerResult> + Send>>;
}

/// File-backed ledger appending CSV lines, creating the file on first use.
#[derive(Clone, Debug)]
pub struct FileLedger {
    path: PathBuf,
}

impl FileLedger {
    /// Creates a ledger writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this ledger appends to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BookingLedger for FileLedger {
    fn append(&self, record: &BookingRecord) -> Pin<Box<dyn Future<Output = LedgerResult> + Send>> {
        let path = self.path.clone();
        let line = record.ledger_line();

        Box::pin(async move {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .await
                .map_err(|error| LedgerError(error.to_string()))?;

            file.write_all(line.as_bytes())
                .await
                .map_err(|error| LedgerError(error.to_string()))?;
            file.write_all(b"\n")
                .await
                .map_err(|error| LedgerError(error.to_string()))?;
            file.flush()
                .await
                .map_err(|error| LedgerError(error.to_string()))?;

            tracing::debug!(path = %path.display(), "booking appended to ledger");
            Ok(())
        })
    }
}

/// In-memory ledger for tests and demos; exposes the appended lines.
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryLedger {
    /// Creates an empty in-memory ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines appended so far, in order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl BookingLedger for MemoryLedger {
    fn append(&self, record: &BookingRecord) -> Pin<Box<dyn Future<Output = LedgerResult> + Send>> {
        let lines = Arc::clone(&self.lines);
        let line = record.ledger_line();

        Box::pin(async move {
            lines
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(line);
            Ok(())
        })
    }
}
