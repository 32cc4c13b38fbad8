use log::trace;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Cancelable periodic task. Runs `on_tick` every `period` on a background
/// thread until cancelled, dropped, or `on_tick` returns `false`.
pub struct Ticker {
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn start<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let (cancel, cancelled) = mpsc::channel::<()>();
        let handle = thread::spawn(move || loop {
            match cancelled.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {
                    if !on_tick() {
                        break;
                    }
                }
                // explicit cancel, or the Ticker was dropped
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        trace!(target: "ticker", "Started ticker every {:?}", period);
        Self {
            cancel: Some(cancel),
            handle: Some(handle),
        }
    }

    /// Stops the task and waits for the thread; no tick runs after this returns.
    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            trace!(target: "ticker", "Ticker stopped");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
