//! Eased overlay opacity.
//!
//! The overlay frame is dimmed while the user drags or pinches the photo, and
//! fades back to full opacity once they stop. The fade is an exponential ease:
//! each tick closes 10% of the remaining gap, and the value snaps to the
//! target once the gap is below 0.01.
//!
//! # States
//!
//! - **Idle**: `current == target`, no frames needed
//! - **Animating**: `tick()` must be called once per display frame
//!
//! The animator never schedules anything itself. The host's frame callback
//! drives it through [`OpacityAnimator::tick`] while
//! [`OpacityAnimator::is_animating`] is true, so only one stepping loop can
//! exist per animator.

use serde::{Deserialize, Serialize};

/// Fraction of the remaining gap closed on each tick.
pub const EASE_FACTOR: f32 = 0.1;

/// Gap below which the value snaps to the target.
pub const SNAP_THRESHOLD: f32 = 0.01;

/// Animation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationState {
    /// At rest on the target.
    #[default]
    Idle,
    /// Stepping toward the target.
    Animating,
}

/// A single eased scalar in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OpacityAnimator {
    current: f32,
    target: f32,
    state: AnimationState,
}

impl Default for OpacityAnimator {
    fn default() -> Self {
        Self {
            current: 1.0,
            target: 1.0,
            state: AnimationState::Idle,
        }
    }
}

impl OpacityAnimator {
    /// Create an animator resting at full opacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current opacity.
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.current
    }

    /// Opacity being eased toward.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Current animation state.
    #[inline]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Whether the host should keep calling [`tick`](Self::tick).
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.state == AnimationState::Animating
    }

    /// Set a new target opacity.
    ///
    /// Values outside `[0, 1]` are clamped and `NaN` is treated as fully
    /// opaque. Starts animating if the target differs from the current value;
    /// an animation already in flight simply retargets.
    pub fn set_target(&mut self, value: f32) {
        self.target = if value.is_nan() {
            1.0
        } else {
            value.clamp(0.0, 1.0)
        };

        if self.state == AnimationState::Idle && self.current != self.target {
            self.state = AnimationState::Animating;
        }
    }

    /// Advance the animation by one frame.
    ///
    /// Returns `true` if a redraw is needed (the animator was animating when
    /// called), `false` when idle.
    pub fn tick(&mut self) -> bool {
        if self.state == AnimationState::Idle {
            return false;
        }

        let diff = self.target - self.current;
        if diff.abs() < SNAP_THRESHOLD {
            self.current = self.target;
            self.state = AnimationState::Idle;
        } else {
            self.current += diff * EASE_FACTOR;
        }
        true
    }

    /// Stop animating, leaving the value wherever it currently is.
    pub fn stop(&mut self) {
        self.target = self.current;
        self.state = AnimationState::Idle;
    }

    /// Return to full opacity immediately.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
