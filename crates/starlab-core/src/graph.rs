//! Graph construction over circular positions and star recognition.
//!
//! Points are identified by insertion order. Recognition first snaps them
//! onto a circle by angle ([`circular_order`]), re-indexes every edge by
//! circular position, then checks that the edges are exactly the
//! "every s-th point" pattern for a single step size.

use petgraph::graphmap::UnGraphMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::geometry::{circular_order, Point};
use crate::star::Star;

/// Identity of a point: its insertion index.
pub type PointId = usize;

/// An undirected edge between two points, stored smaller identity first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub a: PointId,
    pub b: PointId,
}

impl Edge {
    /// Create an edge, ordering the endpoints canonically.
    pub fn new(p: PointId, q: PointId) -> Self {
        Self {
            a: p.min(q),
            b: p.max(q),
        }
    }

    /// Whether both endpoints are the same point.
    pub fn is_loop(&self) -> bool {
        self.a == self.b
    }
}

impl From<(PointId, PointId)> for Edge {
    fn from((p, q): (PointId, PointId)) -> Self {
        Self::new(p, q)
    }
}

/// Undirected adjacency indexed by circular position (`0..len`).
#[derive(Debug, Clone)]
pub struct CircularGraph {
    len: usize,
    graph: UnGraphMap<usize, ()>,
}

impl CircularGraph {
    /// Number of positions on the circle.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether positions `u` and `v` are connected.
    pub fn contains_edge(&self, u: usize, v: usize) -> bool {
        self.graph.contains_edge(u, v)
    }

    /// Neighbors of position `u`, in ascending order.
    pub fn neighbors(&self, u: usize) -> Vec<usize> {
        if !self.graph.contains_node(u) {
            return Vec::new();
        }
        let mut out: Vec<usize> = self.graph.neighbors(u).collect();
        out.sort_unstable();
        out
    }
}

/// Re-index `edges` (by insertion identity) through the circular `order`.
///
/// `order[i]` is the point sitting at circular position `i`.
pub fn build_circular_graph(order: &[PointId], edges: &[Edge]) -> CoreResult<CircularGraph> {
    let len = order.len();
    let mut position = vec![usize::MAX; len];
    for (pos, &id) in order.iter().enumerate() {
        if id < len {
            position[id] = pos;
        }
    }

    let mut graph = UnGraphMap::with_capacity(len, edges.len());
    for pos in 0..len {
        graph.add_node(pos);
    }

    for edge in edges {
        let (pa, pb) = match (position.get(edge.a), position.get(edge.b)) {
            (Some(&pa), Some(&pb)) if pa != usize::MAX && pb != usize::MAX => (pa, pb),
            _ => {
                return Err(CoreError::EdgeOutOfRange {
                    a: edge.a,
                    b: edge.b,
                    points: len,
                })
            }
        };
        graph.add_edge(pa, pb, ());
    }

    Ok(CircularGraph { len, graph })
}

/// Guess a starting position and step size from the first edge found.
///
/// The start is the lowest position with a neighbor; the step is the
/// circular distance to its lowest neighbor, folded to `min(d, n - d)`.
pub fn infer_step_size(graph: &CircularGraph) -> CoreResult<(usize, usize)> {
    let n = graph.len();
    let found = (0..n).find_map(|u| graph.neighbors(u).first().map(|&v| (u, v)));

    let Some((source, target)) = found else {
        return Err(CoreError::NoEdges { points: n });
    };

    let d = source.abs_diff(target);
    Ok((source, d.min(n - d)))
}

/// Decide which star, if any, the drawing forms.
///
/// Precedence: no points is not a star; one point is `{1/1}`; no edges is
/// the unconnected `{p/0}`; two points with an edge is `{2/1}`; otherwise
/// the edges must trace exactly one `{n/s}` cycle and nothing else.
pub fn classify(points: &[Point], edges: &[Edge]) -> CoreResult<Star> {
    match points.len() {
        0 => return Ok(Star::NOT_A_STAR),
        1 => return Ok(Star::new(1, 1)),
        n if edges.is_empty() => return Ok(Star::new(n, 0)),
        2 => return Ok(Star::new(2, 1)),
        _ => {}
    }

    let n = points.len();
    let order = circular_order(points);
    let graph = build_circular_graph(&order, edges)?;
    let (source, step) = infer_step_size(&graph)?;

    let mut traced = 0;
    let mut curr = source;
    loop {
        let next = (curr + step) % n;
        if !graph.contains_edge(curr, next) {
            debug!(points = n, step, at = curr, "star_trace_broken");
            return Ok(Star::NOT_A_STAR);
        }
        curr = next;
        traced += 1;
        if curr == source {
            break;
        }
    }

    // Repeated edges count: the adjacency map merges them.
    if traced == edges.len() {
        Ok(Star::new(n, step))
    } else {
        debug!(points = n, step, traced, edges = edges.len(), "star_has_extra_edges");
        Ok(Star::NOT_A_STAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    fn on_circle(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let t = TAU * i as f64 / n as f64 + 0.1;
                Point::new(100.0 + 50.0 * t.cos(), 100.0 + 50.0 * t.sin())
            })
            .collect()
    }

    fn star_edges(n: usize, s: usize) -> Vec<Edge> {
        (0..n).map(|i| Edge::new(i, (i + s) % n)).collect()
    }

    #[test]
    fn test_edge_is_canonical() {
        assert_eq!(Edge::new(4, 1), Edge::new(1, 4));
        assert_eq!(Edge::new(4, 1).a, 1);
        assert!(Edge::new(3, 3).is_loop());
    }

    #[test]
    fn test_trivial_cases() {
        assert_eq!(classify(&[], &[]).unwrap(), Star::NOT_A_STAR);
        assert_eq!(classify(&on_circle(1), &[]).unwrap(), Star::new(1, 1));
        assert_eq!(classify(&on_circle(6), &[]).unwrap(), Star::new(6, 0));
        assert_eq!(
            classify(&on_circle(2), &[Edge::new(0, 1)]).unwrap(),
            Star::new(2, 1)
        );
    }

    #[test]
    fn test_pentagram() {
        let star = classify(&on_circle(5), &star_edges(5, 2)).unwrap();
        assert_eq!(star, Star::new(5, 2));
    }

    #[test]
    fn test_heptagon_is_step_one() {
        let star = classify(&on_circle(7), &star_edges(7, 1)).unwrap();
        assert_eq!(star, Star::new(7, 1));
    }

    #[test]
    fn test_partial_star_is_rejected() {
        let mut edges = star_edges(7, 3);
        edges.pop();
        assert_eq!(classify(&on_circle(7), &edges).unwrap(), Star::NOT_A_STAR);
    }

    #[test]
    fn test_extra_chord_is_rejected() {
        let mut edges = star_edges(7, 2);
        edges.push(Edge::new(0, 3));
        assert_eq!(classify(&on_circle(7), &edges).unwrap(), Star::NOT_A_STAR);
    }

    #[test]
    fn test_repeated_edge_is_rejected() {
        let points = on_circle(3);
        assert_eq!(classify(&points, &star_edges(3, 1)).unwrap(), Star::new(3, 1));

        let mut edges = star_edges(3, 1);
        edges.push(Edge::new(1, 0));
        assert_eq!(classify(&points, &edges).unwrap(), Star::NOT_A_STAR);
    }

    #[test]
    fn test_two_triangles_are_not_a_single_star() {
        // {6/2} is two disjoint triangles, not one traced cycle
        assert_eq!(
            classify(&on_circle(6), &star_edges(6, 2)).unwrap(),
            Star::NOT_A_STAR
        );
    }

    #[test]
    fn test_build_circular_graph_remaps_through_order() {
        let order = vec![4, 1, 0, 3, 2];
        let graph = build_circular_graph(&order, &[Edge::new(4, 2)]).unwrap();
        assert!(graph.contains_edge(0, 4));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors(4), vec![0]);
    }

    #[test]
    fn test_build_circular_graph_rejects_unknown_points() {
        let err = build_circular_graph(&[0, 1, 2], &[Edge::new(1, 7)]).unwrap_err();
        assert_eq!(
            err,
            CoreError::EdgeOutOfRange {
                a: 1,
                b: 7,
                points: 3
            }
        );
    }

    #[test]
    fn test_infer_step_size_folds_mirror() {
        let graph = build_circular_graph(&[0, 1, 2, 3, 4, 5, 6], &[Edge::new(0, 5)]).unwrap();
        assert_eq!(infer_step_size(&graph).unwrap(), (0, 2));
    }

    #[test]
    fn test_infer_step_size_without_edges_is_an_error() {
        let graph = build_circular_graph(&[0, 1, 2], &[]).unwrap();
        assert_eq!(
            infer_step_size(&graph).unwrap_err(),
            CoreError::NoEdges { points: 3 }
        );
    }
}
