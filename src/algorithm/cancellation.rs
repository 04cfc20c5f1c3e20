//! Cooperative cancellation shared between the interrupt handler and the pipeline

use crate::io::error::{MosaicError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Flag observed at queue boundaries to stop dispatching new work
///
/// Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that has not been cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Cancel this token when the process receives Ctrl-C
    ///
    /// Can only succeed once per process.
    ///
    /// # Errors
    ///
    /// Returns an error if a handler is already installed or the signal can't be hooked
    pub fn install_interrupt_handler(&self) -> Result<()> {
        let token = self.clone();
        ctrlc::set_handler(move || {
            log::warn!("Interrupt received, halting and saving partial image");
            token.cancel();
        })
        .map_err(|source| MosaicError::InterruptHandler { source })
    }
}
