//! Native frame loop for the CLI
//!
//! Uses a tokio interval in a background thread as the frame-scheduling
//! primitive. `stop()` cancels the pending tick and joins the thread.

use crate::loop_state::LoopState;
use parking_lot::Mutex;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{error, info};

/// Repeating per-frame task running on its own thread
pub struct NativeFrameLoop {
    state: Arc<Mutex<LoopState>>,
    cancel: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl NativeFrameLoop {
    /// Run `task` once per `frame_interval` until it returns
    /// `ControlFlow::Break` or the loop is stopped.
    ///
    /// Ticks never overlap: the next tick is awaited only after `task`
    /// returns.
    pub fn start<F>(frame_interval: Duration, mut task: F) -> Self
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        let state = Arc::new(Mutex::new(LoopState::Running));
        let state_clone = state.clone();

        let thread = std::thread::spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    error!(error = %e, "Failed to create tokio runtime");
                    *state_clone.lock() = LoopState::Stopped;
                    return;
                }
            };

            rt.block_on(async move {
                let mut interval = tokio::time::interval(frame_interval);
                interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

                loop {
                    tokio::select! {
                        biased;
                        _ = &mut cancel_rx => break,
                        _ = interval.tick() => {
                            if task().is_break() {
                                break;
                            }
                        }
                    }
                }
            });

            *state_clone.lock() = LoopState::Stopped;
        });

        info!(interval_ms = frame_interval.as_secs_f64() * 1000.0, "Frame loop started");

        Self {
            state,
            cancel: Some(cancel_tx),
            thread: Some(thread),
        }
    }

    /// Cancel the pending frame and wait for the loop thread to exit.
    /// Safe to call more than once.
    pub fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            // Err means the loop already ended on its own
            let _ = cancel.send(());
        }
        self.join();
    }

    /// Block until the loop ends on its own
    pub fn wait(&mut self) {
        self.join();
    }

    pub fn state(&self) -> LoopState {
        *self.state.lock()
    }

    fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("Frame loop thread panicked");
                *self.state.lock() = LoopState::Stopped;
            }
            info!("Frame loop stopped");
        }
    }
}

impl Drop for NativeFrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_break_ends_loop() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let mut frame_loop = NativeFrameLoop::start(Duration::from_millis(1), move || {
            if count_clone.fetch_add(1, Ordering::SeqCst) + 1 == 5 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        frame_loop.wait();
        assert_eq!(count.load(Ordering::SeqCst), 5);
        assert_eq!(frame_loop.state(), LoopState::Stopped);
    }

    #[test]
    fn test_stop_cancels_future_frames() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let mut frame_loop = NativeFrameLoop::start(Duration::from_millis(1), move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
            ControlFlow::Continue(())
        });
        assert!(frame_loop.state().is_running());

        std::thread::sleep(Duration::from_millis(30));
        frame_loop.stop();
        let stopped_at = count.load(Ordering::SeqCst);
        assert!(stopped_at > 0);
        assert_eq!(frame_loop.state(), LoopState::Stopped);

        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::SeqCst), stopped_at);

        // Second stop is a no-op
        frame_loop.stop();
    }
}
