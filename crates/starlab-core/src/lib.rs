//! Core domain types for Starlab, an interactive star polygon lesson.
//!
//! A `{p/s}` star polygon connects every `s`-th of `p` points spaced on a
//! circle. This crate holds everything that does not depend on the screen
//! state machine:
//!
//! - [`Star`]: the `{p/s}` value type and its textual form
//! - [`geometry`]: centroids, angles, circular ordering, smoothstep, layouts
//! - [`graph`]: circular-position graphs and [`classify`], which decides
//!   whether a freeform drawing is a star
//! - [`InputEvent`] and [`SurfaceCommand`]: the abstract event stream in
//!   and drawing commands out

mod error;
mod event;
pub mod geometry;
pub mod graph;
mod star;
mod surface;

pub use error::{CoreError, CoreResult};
pub use event::InputEvent;
pub use geometry::{LayoutCircle, Point};
pub use graph::{build_circular_graph, classify, infer_step_size, CircularGraph, Edge, PointId};
pub use star::Star;
pub use surface::{
    EdgeEnd, InstanceId, NullSurface, Slot, Surface, SurfaceCommand, TimerId, VisualId,
};
