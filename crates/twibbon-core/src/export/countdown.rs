//! Download countdown.
//!
//! Pressing download does not export immediately: a whole-second countdown
//! runs first and the export is produced when it reaches zero.

use serde::{Deserialize, Serialize};

/// What a countdown poll reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownStatus {
    /// Whole seconds left before the export.
    Remaining(u32),
    /// The countdown just finished. Reported once.
    Ready,
}

/// Whole-second countdown driven by host timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportCountdown {
    duration_secs: u32,
    started_at: Option<f64>,
}

impl ExportCountdown {
    /// Create a stopped countdown of `duration_secs` seconds.
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            started_at: None,
        }
    }

    /// Configured length in seconds.
    #[inline]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Start (or restart) counting from `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        self.started_at = Some(now_ms);
    }

    /// Whether the countdown is running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Stop without reporting `Ready`.
    pub fn cancel(&mut self) {
        self.started_at = None;
    }

    /// Seconds left at `now_ms` without advancing the countdown.
    pub fn remaining(&self, now_ms: f64) -> Option<u32> {
        let started_at = self.started_at?;
        let elapsed_secs = ((now_ms - started_at) / 1000.0).floor().max(0.0);
        if elapsed_secs >= self.duration_secs as f64 {
            Some(0)
        } else {
            Some(self.duration_secs - elapsed_secs as u32)
        }
    }

    /// Advance to `now_ms`.
    ///
    /// Returns `None` when stopped. Once the remaining time reaches zero the
    /// countdown stops and `Ready` is returned.
    pub fn poll(&mut self, now_ms: f64) -> Option<CountdownStatus> {
        match self.remaining(now_ms)? {
            0 => {
                self.started_at = None;
                Some(CountdownStatus::Ready)
            }
            n => Some(CountdownStatus::Remaining(n)),
        }
    }
}
