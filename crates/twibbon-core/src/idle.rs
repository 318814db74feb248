//! Debounced idle timer for restoring the overlay after interaction.
//!
//! Every gesture calls [`IdleRestoreTimer::schedule`], which replaces any
//! pending deadline. The timer only fires once the user has been quiet for the
//! full delay. Time is supplied by the caller (the frame callback timestamp in
//! milliseconds), so there is no hidden timer handle to leak.

/// Cancel-and-reschedule debounce timer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdleRestoreTimer {
    deadline_ms: Option<f64>,
}

impl IdleRestoreTimer {
    /// Create a timer with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start the timer so it fires `delay_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64) {
        self.deadline_ms = Some(now_ms + delay_ms.max(0.0));
    }

    /// Returns `true` exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    /// Whether a deadline is pending.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// The pending deadline, if any.
    #[inline]
    pub fn deadline(&self) -> Option<f64> {
        self.deadline_ms
    }
}
