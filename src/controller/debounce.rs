//! Debounced resize dispatch.
//!
//! - One worker thread per debouncer, no process-wide timer state
//! - Bursts of notifications collapse into a single dispatch of the latest width
//! - `flush` skips the quiet period
//! - Uses flume between callers and the worker

use std::thread::{self, JoinHandle};
use std::time::Duration;

use flume::{Receiver, RecvTimeoutError, Sender};
use tracing::{debug, trace, warn};

/// Quiet period before a resize burst is dispatched.
pub const DEFAULT_RESIZE_DELAY: Duration = Duration::from_millis(100);

/// Callback receiving the settled container width.
pub type ResizeCallback = Box<dyn FnMut(f64) + Send>;

#[derive(Debug, Clone, Copy)]
enum Signal {
    Resize(f64),
    Immediate(f64),
}

/// Coalesces container resize notifications and dispatches the settled width.
pub struct ResizeDebouncer {
    tx: Option<Sender<Signal>>,
    worker: Option<JoinHandle<()>>,
    delay: Duration,
}

impl ResizeDebouncer {
    /// Spawn a debouncer that invokes `callback` on its worker thread.
    pub fn new(delay: Duration, callback: impl FnMut(f64) + Send + 'static) -> Self {
        let (tx, rx) = flume::unbounded();
        let callback: ResizeCallback = Box::new(callback);
        let worker = thread::Builder::new()
            .name("griddle-resize".into())
            .spawn(move || run(rx, delay, callback));

        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = ?e, "Failed to spawn resize worker");
                None
            }
        };

        Self {
            tx: Some(tx),
            worker,
            delay,
        }
    }

    /// Spawn a debouncer that forwards settled widths into a channel.
    ///
    /// Useful when the layout controller lives on a thread that polls for work.
    pub fn channel(delay: Duration) -> (Self, Receiver<f64>) {
        let (width_tx, width_rx) = flume::unbounded();
        let debouncer = Self::new(delay, move |width| {
            // The receiving side may already be gone during shutdown.
            let _ = width_tx.send(width);
        });
        (debouncer, width_rx)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a new container width; dispatch happens after the quiet period.
    pub fn notify(&self, width: f64) {
        self.send(Signal::Resize(width));
    }

    /// Dispatch `width` right away, superseding any pending notification.
    pub fn flush(&self, width: f64) {
        self.send(Signal::Immediate(width));
    }

    fn send(&self, signal: Signal) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(signal).is_err() {
            warn!("Resize worker is gone, dropping notification");
        }
    }
}

impl Drop for ResizeDebouncer {
    fn drop(&mut self) {
        // Disconnecting the channel ends the worker loop; pending widths are discarded.
        self.tx.take();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
        debug!("Resize debouncer stopped");
    }
}

fn run(rx: Receiver<Signal>, delay: Duration, mut callback: ResizeCallback) {
    while let Ok(signal) = rx.recv() {
        let mut latest = match signal {
            Signal::Immediate(width) => {
                callback(width);
                continue;
            }
            Signal::Resize(width) => width,
        };

        loop {
            match rx.recv_timeout(delay) {
                Ok(Signal::Resize(width)) => latest = width,
                Ok(Signal::Immediate(width)) => {
                    latest = width;
                    break;
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }

        trace!(width = latest, "Dispatching debounced resize");
        callback(latest);
    }
}
