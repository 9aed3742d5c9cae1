//! Frame-stepped tweening from a freeform drawing to the canonical layout.

use starlab_core::geometry::{
    angle_between, canonical_angles, centroid, circular_order, closest_angle_index, smoothstep,
};
use starlab_core::{LayoutCircle, Point};

/// Canonical targets for a drawing that was recognized as a star.
///
/// Points keep their circular order. The whole ring is rotated so the first
/// point in circular order lands on the target angle nearest to where it
/// already is, which keeps the animation from spinning the figure.
pub fn star_targets(points: &[Point], circle: &LayoutCircle) -> Vec<Point> {
    let Some(center) = centroid(points) else {
        return Vec::new();
    };

    let n = points.len();
    let angles = canonical_angles(n);
    let order = circular_order(points);
    let theta = angle_between(&center, &points[order[0]]);
    let offset = closest_angle_index(theta, &angles);
    let destinations = circle.place(&angles);

    let mut targets = vec![Point::default(); n];
    for (i, &id) in order.iter().enumerate() {
        targets[id] = destinations[(i + offset) % n];
    }
    targets
}

/// Tween controller advanced one frame per timer tick.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    starts: Vec<Point>,
    targets: Vec<Point>,
    frame: usize,
    total_frames: usize,
}

impl AnimationDriver {
    /// Animate every point from `starts[i]` to `targets[i]`.
    pub fn new(starts: Vec<Point>, targets: Vec<Point>, total_frames: usize) -> Self {
        debug_assert_eq!(starts.len(), targets.len());
        Self {
            starts,
            targets,
            frame: 0,
            total_frames: total_frames.max(1),
        }
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    /// Whether the last frame has been produced.
    pub fn is_finished(&self) -> bool {
        self.frame >= self.total_frames
    }

    /// Eased completion fraction for the current frame.
    pub fn alpha(&self) -> f64 {
        smoothstep(self.frame as f64 / self.total_frames as f64)
    }

    /// Advance one frame and return every point's new position.
    /// Once finished, keeps returning the targets.
    pub fn advance(&mut self) -> Vec<Point> {
        if !self.is_finished() {
            self.frame += 1;
        }
        let alpha = self.alpha();
        self.starts
            .iter()
            .zip(&self.targets)
            .map(|(start, target)| start.lerp(target, alpha))
            .collect()
    }
}
