//! Pointer and touch tracking.
//!
//! Turns raw pointer and touch coordinates into pan and pinch actions for the
//! viewport transform. Only coordinates are consumed; the host is responsible
//! for pulling them out of its own event objects.
//!
//! A pinch is only reported once a positive baseline distance exists, so the
//! transform never sees a zero-distance baseline from this tracker.

use serde::{Deserialize, Serialize};

/// A single touch contact in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another touch.
    pub fn distance(&self, other: &TouchPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint between two touches.
    pub fn midpoint(&self, other: &TouchPoint) -> TouchPoint {
        TouchPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// A transform update derived from a gesture sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureAction {
    /// Move the photo by the given canvas delta.
    Pan { dx: f64, dy: f64 },
    /// Zoom about `(center_x, center_y)` in canvas pixels.
    Pinch {
        prev_distance: f64,
        new_distance: f64,
        center_x: f64,
        center_y: f64,
    },
}

/// Transient gesture state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureTracker {
    dragging: bool,
    last: Option<(f64, f64)>,
    pinch_distance: Option<f64>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a single-pointer drag is in progress.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Last recorded pinch baseline, if any.
    #[inline]
    pub fn pinch_distance(&self) -> Option<f64> {
        self.pinch_distance
    }

    /// Begin a mouse/pen drag at `(x, y)`.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.dragging = true;
        self.last = Some((x, y));
    }

    /// Continue a drag. Returns a pan by the delta since the last sample.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<GestureAction> {
        if !self.dragging {
            return None;
        }
        let (last_x, last_y) = self.last.replace((x, y))?;
        Some(GestureAction::Pan {
            dx: x - last_x,
            dy: y - last_y,
        })
    }

    /// End a drag.
    pub fn pointer_up(&mut self) {
        self.reset();
    }

    /// The pointer left the canvas; treated like a release.
    pub fn pointer_leave(&mut self) {
        self.reset();
    }

    /// A touch sequence started or gained a finger.
    ///
    /// One touch starts a drag; two touches record the pinch baseline.
    pub fn touch_start(&mut self, touches: &[TouchPoint]) {
        match touches {
            [only] => {
                self.dragging = true;
                self.last = Some((only.x, only.y));
            }
            [a, b, ..] => {
                let distance = a.distance(b);
                self.pinch_distance = (distance > 0.0).then_some(distance);
            }
            [] => {}
        }
    }

    /// A touch sequence moved.
    ///
    /// # Arguments
    ///
    /// * `touches` - Active touches in client coordinates
    /// * `canvas_origin` - Client coordinates of the canvas' top-left corner,
    ///   subtracted from the pinch centroid to get canvas coordinates
    pub fn touch_move(
        &mut self,
        touches: &[TouchPoint],
        canvas_origin: (f64, f64),
    ) -> Option<GestureAction> {
        match touches {
            [only] => self.pointer_move(only.x, only.y),
            [a, b, ..] => {
                let new_distance = a.distance(b);
                if !(new_distance > 0.0) {
                    return None;
                }

                // No usable baseline yet: this sample becomes the baseline
                let prev_distance = self.pinch_distance.replace(new_distance)?;

                let center = a.midpoint(b);
                Some(GestureAction::Pinch {
                    prev_distance,
                    new_distance,
                    center_x: center.x - canvas_origin.0,
                    center_y: center.y - canvas_origin.1,
                })
            }
            [] => None,
        }
    }

    /// A touch sequence ended (or lost a finger).
    pub fn touch_end(&mut self) {
        self.reset();
    }

    /// Forget all gesture state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
