//! Append-only trade sink.
//!
//! Accepted records are handed off through a bounded channel to a single
//! writer worker on a blocking thread. The hand-off never blocks the
//! frame-servicing task: when the queue is full the record is dropped with a
//! warning. The worker opens the file in append mode, writes one line, and
//! closes it again per record, so every line is a complete, independent
//! observation.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crossbeam_channel::{Receiver, Sender};
use tape_core::types::TradeUpdate;
use tracing::{error, info, warn};

/// Cloneable, non-blocking producer side of the sink.
#[derive(Clone)]
pub struct SinkHandle {
    tx: Sender<TradeUpdate>,
}

impl SinkHandle {
    /// Queue one record for persistence.
    ///
    /// Fire-and-forget: a full queue drops the record with a warning and
    /// the caller continues servicing frames.
    pub fn store(&self, update: TradeUpdate) {
        if self.tx.try_send(update).is_err() {
            warn!("sink queue full, dropping {} update", update.symbol());
        }
    }
}

/// Bounded-queue sink with a single background writer.
pub struct TradeSink {
    tx: Sender<TradeUpdate>,
    worker: tokio::task::JoinHandle<()>,
}

impl TradeSink {
    /// Spawn the writer worker appending to `path`.
    ///
    /// `capacity` bounds the number of records queued but not yet written;
    /// producers never block on a slow disk.
    pub fn spawn(path: PathBuf, capacity: usize) -> Self {
        let (tx, rx) = crossbeam_channel::bounded::<TradeUpdate>(capacity);
        let worker = tokio::task::spawn_blocking(move || run_writer_loop(&path, &rx));
        Self { tx, worker }
    }

    /// A producer handle for the dispatcher.
    pub fn handle(&self) -> SinkHandle {
        SinkHandle { tx: self.tx.clone() }
    }

    /// Close the queue and wait for queued records to drain.
    ///
    /// The worker exits once every [`SinkHandle`] clone has been dropped,
    /// so stop the producers before calling this.
    pub async fn close(self) {
        let Self { tx, worker } = self;
        drop(tx);
        let _ = worker.await;
    }
}

fn run_writer_loop(path: &Path, rx: &Receiver<TradeUpdate>) {
    info!("sink writer started — appending to {}", path.display());
    while let Ok(update) = rx.recv() {
        // An open or write failure drops this one record; it is never retried.
        if let Err(e) = append_record(path, &update) {
            error!("failed to persist {} update: {e}", update.symbol());
        }
    }
    info!("sink writer exited");
}

fn append_record(path: &Path, update: &TradeUpdate) -> std::io::Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    writeln!(file, "{}", format_line(update))
}

/// The fixed output template: symbol plus price with exactly two decimals.
pub fn format_line(update: &TradeUpdate) -> String {
    format!("Last trade update: {} price = {:.2}", update.symbol(), update.price)
}
