//! Session configuration: canvas geometry and animation pacing.

use serde::{Deserialize, Serialize};
use starlab_core::LayoutCircle;

/// Knobs shared by every reactor in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Canvas width in pixels.
    pub canvas_width: f64,
    /// Canvas height in pixels.
    pub canvas_height: f64,
    /// Radius of a point marker. Also the pick radius.
    pub point_radius: f64,
    /// Gap between the finished star and the canvas edge.
    pub window_padding: f64,
    /// Animation timer period.
    pub timer_delay_ms: u64,
    /// Length of the freeform-to-star animation.
    pub animation_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            canvas_width: 500.0,
            canvas_height: 800.0,
            point_radius: 10.0,
            window_padding: 25.0,
            timer_delay_ms: 25,
            animation_ms: 2000,
        }
    }
}

impl SessionConfig {
    /// A config with a very short animation, for tests and quick replays.
    pub fn fast() -> Self {
        Self {
            animation_ms: 100,
            ..Default::default()
        }
    }

    /// Number of timer ticks an animation takes (at least one).
    pub fn total_frames(&self) -> usize {
        (self.animation_ms / self.timer_delay_ms.max(1)).max(1) as usize
    }

    /// Distance within which a press or release lands on an existing point.
    pub fn pick_radius(&self) -> f64 {
        self.point_radius
    }

    /// The circle finished stars are laid out on.
    pub fn layout_circle(&self) -> LayoutCircle {
        LayoutCircle::fit(
            self.canvas_width,
            self.canvas_height,
            self.point_radius,
            self.window_padding,
        )
    }
}
