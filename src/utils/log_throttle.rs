use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct WindowState {
    window_started_at: Instant,
    suppressed: u64,
}

/// Rate limits repetitive log lines per key, one line per window.
///
/// Reporting cycles repeat the same messages for the same metrics every few
/// seconds; this keeps one line per window and counts the rest.
#[derive(Debug)]
pub struct LogThrottle {
    interval: Duration,
    windows: Mutex<HashMap<String, WindowState>>,
}

impl LogThrottle {
    pub fn new(interval: Duration) -> Self {
        LogThrottle {
            interval,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Returns `Some(suppressed_count)` when a log for `key` should be emitted,
    /// otherwise `None` and the event is counted as suppressed for the active window.
    pub fn should_emit(&self, key: &str) -> Option<u64> {
        // a poisoned map only holds counters, keep using it
        let mut map = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let now = Instant::now();

        match map.get_mut(key) {
            Some(state) => {
                if now.duration_since(state.window_started_at) >= self.interval {
                    let suppressed = state.suppressed;
                    state.window_started_at = now;
                    state.suppressed = 0;
                    Some(suppressed)
                } else {
                    state.suppressed += 1;
                    None
                }
            }
            None => {
                map.insert(
                    key.to_string(),
                    WindowState {
                        window_started_at: now,
                        suppressed: 0,
                    },
                );
                Some(0)
            }
        }
    }
}
