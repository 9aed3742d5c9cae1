//! Property-style checks for star classification over many `{n/s}` pairs.

use std::f64::consts::TAU;

use starlab_core::{classify, Edge, Point, Star};

// ============================================================================
// Helpers
// ============================================================================

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// `n` points on a slightly rotated circle, in insertion order around it.
fn on_circle(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = TAU * i as f64 / n as f64 + 0.05;
            Point::new(250.0 + 120.0 * t.cos(), 300.0 + 120.0 * t.sin())
        })
        .collect()
}

fn star_edges(n: usize, s: usize) -> Vec<Edge> {
    (0..n).map(|i| Edge::new(i, (i + s) % n)).collect()
}

/// Every valid `(n, s)` with `n >= 3`, `1 <= s <= n/2`, `gcd(n, s) = 1`.
fn valid_pairs(max_n: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for n in 3..=max_n {
        for s in 1..=n / 2 {
            if gcd(n, s) == 1 {
                out.push((n, s));
            }
        }
    }
    out
}

/// Apply the relabeling `old id -> perm[old id]` to points and edges.
fn relabel(points: &[Point], edges: &[Edge], perm: &[usize]) -> (Vec<Point>, Vec<Edge>) {
    let mut new_points = vec![Point::default(); points.len()];
    for (old, &new) in perm.iter().enumerate() {
        new_points[new] = points[old];
    }
    let new_edges = edges
        .iter()
        .map(|e| Edge::new(perm[e.a], perm[e.b]))
        .collect();
    (new_points, new_edges)
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn exact_star_patterns_are_recognized() {
    for (n, s) in valid_pairs(13) {
        let star = classify(&on_circle(n), &star_edges(n, s)).unwrap();
        assert_eq!(star, Star::new(n, s), "pattern {{{n}/{s}}}");
    }
}

#[test]
fn mirror_step_is_reported_as_the_smaller_one() {
    for (n, s) in valid_pairs(13) {
        let star = classify(&on_circle(n), &star_edges(n, n - s)).unwrap();
        assert_eq!(star, Star::new(n, s));
        assert!(star.step_size <= n / 2);
    }
}

#[test]
fn one_missing_edge_is_not_a_star() {
    for (n, s) in valid_pairs(11) {
        for skip in [0, n / 2, n - 1] {
            let mut edges = star_edges(n, s);
            edges.remove(skip);
            let star = classify(&on_circle(n), &edges).unwrap();
            assert_eq!(star, Star::NOT_A_STAR, "{{{n}/{s}}} without edge {skip}");
        }
    }
}

#[test]
fn one_extra_edge_is_not_a_star() {
    for (n, s) in valid_pairs(11) {
        let Some(t) = (1..n).find(|&t| t != s && t != n - s) else {
            continue; // the triangle has no spare chord
        };
        let mut edges = star_edges(n, s);
        edges.push(Edge::new(0, t));
        let star = classify(&on_circle(n), &edges).unwrap();
        assert_eq!(star, Star::NOT_A_STAR, "{{{n}/{s}}} plus chord 0-{t}");
    }
}

#[test]
fn classification_ignores_point_labels() {
    for (n, s) in valid_pairs(9) {
        let points = on_circle(n);
        let edges = star_edges(n, s);

        let reversed: Vec<usize> = (0..n).map(|i| n - 1 - i).collect();
        let rotated: Vec<usize> = (0..n).map(|i| (i + 3) % n).collect();

        for perm in [reversed, rotated] {
            let (p2, e2) = relabel(&points, &edges, &perm);
            assert_eq!(
                classify(&p2, &e2).unwrap(),
                classify(&points, &edges).unwrap()
            );
        }
    }

    // non-stars stay non-stars under relabeling too
    let points = on_circle(7);
    let mut edges = star_edges(7, 2);
    edges.pop();
    let perm: Vec<usize> = (0..7).map(|i| (i * 3) % 7).collect();
    let (p2, e2) = relabel(&points, &edges, &perm);
    assert_eq!(classify(&p2, &e2).unwrap(), Star::NOT_A_STAR);
}

#[test]
fn loosely_drawn_pentagram() {
    // a hand-drawn pentagon, entered in a scrambled order
    let points = vec![
        Point::new(150.0, 168.0),
        Point::new(103.0, 22.0),
        Point::new(24.0, 84.0),
        Point::new(183.0, 77.0),
        Point::new(52.0, 175.0),
    ];
    // around the circle: 1 (top), 3 (right), 0 (bottom right), 4 (bottom left), 2 (left)
    let ring = [1, 3, 0, 4, 2];
    let edges: Vec<Edge> = (0..5).map(|i| Edge::new(ring[i], ring[(i + 2) % 5])).collect();
    assert_eq!(classify(&points, &edges).unwrap(), Star::new(5, 2));
}

#[test]
fn two_points_one_edge() {
    let points = vec![Point::new(10.0, 10.0), Point::new(90.0, 40.0)];
    assert_eq!(
        classify(&points, &[Edge::new(1, 0)]).unwrap(),
        Star::new(2, 1)
    );
}
