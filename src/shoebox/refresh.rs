//! Scheduled view recomputation.
//!
//! Date-based to-do classification (overdue, due today) drifts as wall time
//! passes even when no data changes, so the view needs a periodic nudge to
//! re-derive it. The ticker below fires a callback on a fixed interval; the
//! callback re-runs the query engine over a snapshot and redraws. It must
//! never mutate stored data.

use log::debug;
use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How often the to-do view re-derives its date-based classification.
pub const OVERDUE_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// A background ticker that periodically re-triggers view recomputation.
///
/// ## Example
///
/// ```ignore
/// use shoebox::refresh::{RefreshTimer, OVERDUE_REFRESH_INTERVAL};
///
/// // The renderer's event loop owns the receiving end; each tick asks it
/// // to re-query and redraw the to-do list.
/// let (tick_tx, tick_rx) = std::sync::mpsc::channel();
/// let timer = RefreshTimer::spawn(OVERDUE_REFRESH_INTERVAL, move || {
///     let _ = tick_tx.send(());
/// });
///
/// // ... event loop drains tick_rx ...
///
/// timer.stop();
/// ```
pub struct RefreshTimer {
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<u64>>,
}

impl RefreshTimer {
    /// Spawn a ticker firing `on_tick` every `interval` until stopped.
    pub fn spawn<F>(interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = channel();

        let handle = thread::spawn(move || {
            let mut ticks: u64 = 0;
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        ticks += 1;
                        debug!("view refresh tick {}", ticks);
                        on_tick();
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            ticks
        });

        Self {
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Signal the ticker to stop and wait for it to finish.
    /// Returns the number of ticks delivered.
    pub fn stop(mut self) -> u64 {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            handle.join().unwrap_or(0)
        } else {
            0
        }
    }

    /// Signal the ticker to stop without waiting.
    pub fn signal_stop(&self) {
        let _ = self.stop_tx.send(());
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(());
        // Don't join on drop - let the thread finish naturally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[test]
    fn delivers_ticks_until_stopped() {
        let count = Arc::new(AtomicU64::new(0));
        let seen = Arc::clone(&count);
        let timer = RefreshTimer::spawn(Duration::from_millis(5), move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(60));
        let ticks = timer.stop();

        assert!(ticks > 0);
        assert_eq!(ticks, count.load(Ordering::SeqCst));
    }

    #[test]
    fn stop_before_first_tick_delivers_none() {
        let timer = RefreshTimer::spawn(Duration::from_secs(3600), || {
            panic!("tick should never fire");
        });
        assert_eq!(timer.stop(), 0);
    }
}
