//! Points and edges owned by one reactor, mirrored onto the surface.

use starlab_core::{Edge, EdgeEnd, InstanceId, Point, PointId, Surface, SurfaceCommand, VisualId};

/// A reactor's logical drawing plus the visuals that show it.
///
/// Every mutation submits the matching surface command, so the rendered
/// picture always follows the logical one.
#[derive(Debug, Clone)]
pub struct Drawing {
    owner: InstanceId,
    points: Vec<Point>,
    edges: Vec<Edge>,
    origin: Option<PointId>,
}

impl Drawing {
    pub fn new(owner: InstanceId) -> Self {
        Self {
            owner,
            points: Vec::new(),
            edges: Vec::new(),
            origin: None,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Anchor of the edge being drawn, if any.
    pub fn origin(&self) -> Option<PointId> {
        self.origin
    }

    /// Point within `radius` of `(x, y)`, earliest first.
    pub fn pick(&self, x: f64, y: f64, radius: f64) -> Option<PointId> {
        starlab_core::geometry::pick(&self.points, &Point::new(x, y), radius)
    }

    /// Add a point and its marker.
    pub fn add_point(&mut self, at: Point, surface: &mut dyn Surface) -> PointId {
        let id = self.points.len();
        self.points.push(at);
        surface.submit(SurfaceCommand::CreatePoint {
            id: VisualId::point(self.owner, id),
            at,
        });
        id
    }

    /// Point at `(x, y)`, creating one if nothing is in reach.
    pub fn pick_or_add(&mut self, x: f64, y: f64, radius: f64, surface: &mut dyn Surface) -> PointId {
        match self.pick(x, y, radius) {
            Some(id) => id,
            None => self.add_point(Point::new(x, y), surface),
        }
    }

    /// Start a rubber-band edge anchored at `origin`.
    pub fn begin_edge(&mut self, origin: PointId, surface: &mut dyn Surface) {
        if self.origin.is_some() {
            surface.submit(SurfaceCommand::RemoveEdge {
                id: VisualId::active_edge(self.owner),
            });
        }
        let at = self.points[origin];
        self.origin = Some(origin);
        surface.submit(SurfaceCommand::CreateEdge {
            id: VisualId::active_edge(self.owner),
            from: at,
            to: at,
        });
    }

    /// Move the free end of the rubber-band edge.
    pub fn drag_edge(&mut self, x: f64, y: f64, surface: &mut dyn Surface) {
        if self.origin.is_none() {
            return;
        }
        surface.submit(SurfaceCommand::MoveEdgeEndpoint {
            id: VisualId::active_edge(self.owner),
            end: EdgeEnd::End,
            to: Point::new(x, y),
        });
    }

    /// Drop the rubber-band edge and try to commit `origin -> dest`.
    ///
    /// Returns the committed edge, or `None` for a self-loop, a duplicate,
    /// or when no edge was being drawn. The anchor is always cleared.
    pub fn finish_edge(&mut self, dest: Option<PointId>, surface: &mut dyn Surface) -> Option<Edge> {
        let origin = self.origin.take()?;
        surface.submit(SurfaceCommand::RemoveEdge {
            id: VisualId::active_edge(self.owner),
        });
        self.connect(origin, dest?, surface)
    }

    /// Commit an edge directly. Self-loops and duplicates are ignored.
    pub fn connect(&mut self, p: PointId, q: PointId, surface: &mut dyn Surface) -> Option<Edge> {
        let edge = Edge::new(p, q);
        if edge.is_loop() || edge.b >= self.points.len() || self.edges.contains(&edge) {
            return None;
        }

        let index = self.edges.len();
        self.edges.push(edge);
        surface.submit(SurfaceCommand::CreateEdge {
            id: VisualId::edge(self.owner, index),
            from: self.points[edge.a],
            to: self.points[edge.b],
        });
        Some(edge)
    }

    /// Remove every edge, keeping the points.
    pub fn clear_edges(&mut self, surface: &mut dyn Surface) {
        for index in 0..self.edges.len() {
            surface.submit(SurfaceCommand::RemoveEdge {
                id: VisualId::edge(self.owner, index),
            });
        }
        self.edges.clear();
    }

    /// Move every point (and the edges hanging off them) to `positions`.
    pub fn move_points(&mut self, positions: &[Point], surface: &mut dyn Surface) {
        for (id, &to) in positions.iter().enumerate().take(self.points.len()) {
            self.points[id] = to;
            surface.submit(SurfaceCommand::MovePoint {
                id: VisualId::point(self.owner, id),
                to,
            });
        }
        for (index, edge) in self.edges.iter().enumerate() {
            let id = VisualId::edge(self.owner, index);
            surface.submit(SurfaceCommand::MoveEdgeEndpoint {
                id,
                end: EdgeEnd::Start,
                to: self.points[edge.a],
            });
            surface.submit(SurfaceCommand::MoveEdgeEndpoint {
                id,
                end: EdgeEnd::End,
                to: self.points[edge.b],
            });
        }
    }

    /// Remove every visual this drawing owns.
    pub fn remove_visuals(&mut self, surface: &mut dyn Surface) {
        if self.origin.take().is_some() {
            surface.submit(SurfaceCommand::RemoveEdge {
                id: VisualId::active_edge(self.owner),
            });
        }
        for index in 0..self.edges.len() {
            surface.submit(SurfaceCommand::RemoveEdge {
                id: VisualId::edge(self.owner, index),
            });
        }
        for id in 0..self.points.len() {
            surface.submit(SurfaceCommand::RemovePoint {
                id: VisualId::point(self.owner, id),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_and_loop_edges_are_ignored() {
        let mut surface: Vec<SurfaceCommand> = Vec::new();
        let mut drawing = Drawing::new(InstanceId(1));
        let a = drawing.add_point(Point::new(0.0, 0.0), &mut surface);
        let b = drawing.add_point(Point::new(50.0, 0.0), &mut surface);

        assert_eq!(drawing.connect(b, a, &mut surface), Some(Edge::new(a, b)));
        assert_eq!(drawing.connect(a, b, &mut surface), None);
        assert_eq!(drawing.connect(a, a, &mut surface), None);
        assert_eq!(drawing.edges().len(), 1);
    }

    #[test]
    fn test_finish_without_begin_is_a_no_op() {
        let mut surface: Vec<SurfaceCommand> = Vec::new();
        let mut drawing = Drawing::new(InstanceId(1));
        drawing.add_point(Point::new(0.0, 0.0), &mut surface);
        surface.clear();

        assert_eq!(drawing.finish_edge(Some(0), &mut surface), None);
        drawing.drag_edge(5.0, 5.0, &mut surface);
        assert!(surface.is_empty());
    }

    #[test]
    fn test_rubber_band_lifecycle() {
        let mut surface: Vec<SurfaceCommand> = Vec::new();
        let mut drawing = Drawing::new(InstanceId(7));
        let a = drawing.add_point(Point::new(0.0, 0.0), &mut surface);
        let b = drawing.add_point(Point::new(40.0, 0.0), &mut surface);
        surface.clear();

        drawing.begin_edge(a, &mut surface);
        drawing.drag_edge(20.0, 3.0, &mut surface);
        let edge = drawing.finish_edge(Some(b), &mut surface);

        assert_eq!(edge, Some(Edge::new(0, 1)));
        assert_eq!(drawing.origin(), None);
        assert_eq!(
            surface,
            vec![
                SurfaceCommand::CreateEdge {
                    id: VisualId::active_edge(InstanceId(7)),
                    from: Point::new(0.0, 0.0),
                    to: Point::new(0.0, 0.0),
                },
                SurfaceCommand::MoveEdgeEndpoint {
                    id: VisualId::active_edge(InstanceId(7)),
                    end: EdgeEnd::End,
                    to: Point::new(20.0, 3.0),
                },
                SurfaceCommand::RemoveEdge {
                    id: VisualId::active_edge(InstanceId(7)),
                },
                SurfaceCommand::CreateEdge {
                    id: VisualId::edge(InstanceId(7), 0),
                    from: Point::new(0.0, 0.0),
                    to: Point::new(40.0, 0.0),
                },
            ]
        );
    }

    #[test]
    fn test_remove_visuals_covers_everything() {
        let mut surface: Vec<SurfaceCommand> = Vec::new();
        let mut drawing = Drawing::new(InstanceId(2));
        let a = drawing.add_point(Point::new(0.0, 0.0), &mut surface);
        let b = drawing.add_point(Point::new(40.0, 0.0), &mut surface);
        drawing.connect(a, b, &mut surface);
        drawing.begin_edge(a, &mut surface);
        surface.clear();

        drawing.remove_visuals(&mut surface);
        assert_eq!(surface.len(), 1 + 1 + 2);
        assert!(surface
            .iter()
            .all(|c| matches!(c, SurfaceCommand::RemoveEdge { .. } | SurfaceCommand::RemovePoint { .. })));
    }
}
