//! Classify a drawing stored as JSON.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use starlab_core::{classify, Edge, Point, Star};

/// `{ "points": [[x, y], ...], "edges": [[a, b], ...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawingFile {
    pub points: Vec<(f64, f64)>,
    #[serde(default)]
    pub edges: Vec<(usize, usize)>,
}

impl DrawingFile {
    pub fn classify(&self) -> Result<Star> {
        let points: Vec<Point> = self.points.iter().copied().map(Point::from).collect();
        let edges: Vec<Edge> = self.edges.iter().copied().map(Edge::from).collect();
        Ok(classify(&points, &edges)?)
    }
}

/// Print the star a drawing forms, or `(not a star)`.
pub fn execute(path: &Path, json: bool) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read drawing from {}", path.display()))?;
    let drawing: DrawingFile = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse drawing {}", path.display()))?;

    let star = drawing.classify()?;
    if json {
        let report = serde_json::json!({
            "star": star.is_star().then(|| star.to_string()),
            "num_points": star.is_star().then_some(star.num_points),
            "step_size": star.is_star().then_some(star.step_size),
        });
        println!("{report}");
    } else {
        println!("{star}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawing_file_shape() {
        let drawing: DrawingFile = serde_json::from_str(
            r#"{"points": [[0, 0], [10, 0], [5, 8]], "edges": [[0, 1], [1, 2], [2, 0]]}"#,
        )
        .unwrap();
        assert_eq!(drawing.classify().unwrap(), Star::new(3, 1));
    }

    #[test]
    fn test_edges_are_optional() {
        let drawing: DrawingFile =
            serde_json::from_str(r#"{"points": [[0, 0], [10, 0]]}"#).unwrap();
        assert_eq!(drawing.classify().unwrap(), Star::new(2, 0));
    }

    #[test]
    fn test_bad_edges_are_errors() {
        let drawing: DrawingFile = serde_json::from_str(
            r#"{"points": [[0, 0], [10, 0], [5, 8]], "edges": [[0, 9]]}"#,
        )
        .unwrap();
        assert!(drawing.classify().is_err());
    }
}
