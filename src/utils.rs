//! Small helpers shared by the pipeline and the entry points.
//!
//! - [`ElapsedTimer`]: scoped start/elapsed logging
//! - [`seconds`]: turns a seconds value from the CLI into a [`Duration`]
//! - [`truncate_for_log`]: keeps long values out of log lines

use crate::error::{JaundiceError, Result};
use std::time::{Duration, Instant};
use tracing::info;

/// Logs when a stage starts and, on drop, how long it took.
///
/// The guard logs on drop, so the elapsed line is written on every exit path,
/// including when an enclosing timeout cancels the stage.
#[derive(Debug)]
pub struct ElapsedTimer {
    label: &'static str,
    started: Instant,
}

impl ElapsedTimer {
    /// Log the start of `label` and begin timing it.
    pub fn start(label: &'static str) -> Self {
        info!(stage = label, "Start analyze article");
        Self {
            label,
            started: Instant::now(),
        }
    }
}

impl Drop for ElapsedTimer {
    fn drop(&mut self) {
        let elapsed = self.started.elapsed();
        info!(
            stage = self.label,
            elapsed_secs = elapsed.as_secs_f64(),
            "Article analysis completed in {:.3} sec",
            elapsed.as_secs_f64()
        );
    }
}

/// Convert a non-negative, finite number of seconds into a [`Duration`].
pub fn seconds(value: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(value)
        .map_err(|e| JaundiceError::Config(format!("invalid timeout {value}: {e}")))
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` bytes (backing off to a char boundary) with
/// an ellipsis and the number of dropped bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}
