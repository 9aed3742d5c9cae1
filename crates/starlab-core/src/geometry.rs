//! Pure geometry helpers: centroids, angles, circular ordering, layouts.
//!
//! All angles follow screen conventions: the y axis points down, so an
//! increasing `atan2` angle walks clockwise on screen.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

/// A position on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point.
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Linear interpolation toward `target` by `alpha` (0 = self, 1 = target).
    pub fn lerp(&self, target: &Point, alpha: f64) -> Point {
        Point {
            x: self.x + alpha * (target.x - self.x),
            y: self.y + alpha * (target.y - self.y),
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// First point (in insertion order) within `radius` of `at`.
pub fn pick(points: &[Point], at: &Point, radius: f64) -> Option<usize> {
    points
        .iter()
        .position(|p| p.distance_squared(at) <= radius * radius)
}

/// Arithmetic mean of the given points, or `None` for an empty slice.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }

    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let n = points.len() as f64;
    Some(Point::new(sx / n, sy / n))
}

/// Angle of the ray from `center` to `dest`, in `(-PI, PI]`.
pub fn angle_between(center: &Point, dest: &Point) -> f64 {
    (dest.y - center.y).atan2(dest.x - center.x)
}

/// Indices of `points` sorted by their angle around the centroid.
///
/// Coincident angles keep their original relative order (stable sort).
pub fn circular_order(points: &[Point]) -> Vec<usize> {
    let Some(center) = centroid(points) else {
        return Vec::new();
    };

    let angles: Vec<f64> = points.iter().map(|p| angle_between(&center, p)).collect();
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| angles[a].total_cmp(&angles[b]));
    order
}

/// Smoothstep easing: `3t^2 - 2t^3`.
pub fn smoothstep(t: f64) -> f64 {
    -2.0 * t * t * t + 3.0 * t * t
}

/// Target angles for `n` evenly spaced points, starting at `3PI/2` and
/// stepping clockwise on screen.
pub fn canonical_angles(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }

    let step = TAU / n as f64;
    let base = 3.0 * PI / 2.0;
    (0..n).map(|i| base + step * i as f64).collect()
}

/// The circle a finished star is laid out on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCircle {
    pub center: Point,
    pub radius: f64,
}

impl LayoutCircle {
    /// Largest circle that fits the canvas, leaving room for the point
    /// markers and a fixed padding.
    pub fn fit(width: f64, height: f64, point_radius: f64, padding: f64) -> Self {
        Self {
            center: Point::new(width / 2.0, height / 2.0),
            radius: width.min(height) / 2.0 - point_radius - padding,
        }
    }

    /// Position on the circle at the given angle.
    pub fn at(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    /// Positions for every angle, in order.
    pub fn place(&self, angles: &[f64]) -> Vec<Point> {
        angles.iter().map(|&a| self.at(a)).collect()
    }
}

/// Shorter angular distance between two angles, in `[0, PI]`.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

/// Index into `angles` closest to `theta`. First index wins on ties.
pub fn closest_angle_index(theta: f64, angles: &[f64]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, &angle) in angles.iter().enumerate() {
        let distance = angular_distance(angle, theta);
        if distance < best_distance {
            best_distance = distance;
            best = i;
        }
    }
    best
}
