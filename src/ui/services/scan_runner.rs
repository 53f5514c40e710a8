use crate::engines::Scanner;
use crate::error::CryptoscalpError;
use crate::types::{ScanRequest, ScanResult};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

/// Result from a background scan
pub type ScanOutcome = Result<ScanResult, CryptoscalpError>;

/// Runs one scan on a worker thread and hands the outcome back to the UI.
/// There is no cancellation; the worker always runs to completion.
pub struct ScanRunner {
    handle: Option<JoinHandle<()>>,
    result_rx: Receiver<ScanOutcome>,
}

impl ScanRunner {
    /// Start scan in background thread
    pub fn start(scanner: Scanner, request: ScanRequest) -> Result<Self, CryptoscalpError> {
        let (result_tx, result_rx) = channel();

        let handle = thread::Builder::new()
            .name("scan-worker".to_string())
            .spawn(move || {
                let outcome = scanner.scan(&request);
                if let Err(e) = &outcome {
                    log::error!("Scan of {} failed: {}", request.symbol, e);
                }
                // The receiver only disappears when the app is shutting down
                let _ = result_tx.send(outcome);
            })?;

        Ok(Self {
            handle: Some(handle),
            result_rx,
        })
    }

    /// Non-blocking check for the finished scan. Returns `Some` exactly once.
    pub fn try_get_result(&mut self) -> Option<ScanOutcome> {
        if self.handle.is_none() {
            return None;
        }

        match self.result_rx.try_recv() {
            Ok(outcome) => {
                self.join();
                Some(outcome)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.join();
                Some(Err(CryptoscalpError::Worker(
                    "scan thread exited without a result".to_string(),
                )))
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_none()
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Scan thread panicked");
            }
        }
    }
}
