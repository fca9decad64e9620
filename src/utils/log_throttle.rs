use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Window {
    opened_at: Instant,
    suppressed: u64,
}

/// Rate-limits repeated log lines per key.
///
/// The first event for a key in each window is emitted; the rest are
/// counted and the count is reported with the next emitted event.
#[derive(Debug)]
pub struct LogThrottle {
    interval: Duration,
    windows: Mutex<HashMap<&'static str, Window>>,
}

impl LogThrottle {
    pub fn new(interval: Duration) -> Self {
        LogThrottle {
            interval,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// `Some(suppressed_since_last_emit)` when the event should be logged.
    pub fn should_emit(&self, key: &'static str) -> Option<u64> {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        match windows.get_mut(key) {
            None => {
                windows.insert(
                    key,
                    Window {
                        opened_at: now,
                        suppressed: 0,
                    },
                );
                Some(0)
            }
            Some(window) if now.duration_since(window.opened_at) >= self.interval => {
                let suppressed = window.suppressed;
                window.opened_at = now;
                window.suppressed = 0;
                Some(suppressed)
            }
            Some(window) => {
                window.suppressed += 1;
                None
            }
        }
    }
}
