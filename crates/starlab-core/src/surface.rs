//! Abstract drawing commands produced for the rendering collaborator.
//!
//! Reactors never talk to a window directly. They submit
//! [`SurfaceCommand`]s to a [`Surface`], which a front end turns into
//! circles, lines, timers and panel updates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Identity of one constructed reactor. Fresh for every construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a recurring timer. A reactor owns at most one, keyed by its
/// instance, so a stale tick can be recognized after the owner is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(pub u64);

impl TimerId {
    /// The timer owned by the given reactor instance.
    pub fn of(owner: InstanceId) -> Self {
        Self(owner.0)
    }
}

/// Which visual object of a reactor a command addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// The marker for a logical point.
    Point(usize),
    /// A committed edge.
    Edge(usize),
    /// The rubber-band edge following the pointer.
    ActiveEdge,
}

/// Globally unique visual identity: `(owner, slot)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualId {
    pub owner: InstanceId,
    pub slot: Slot,
}

impl VisualId {
    pub fn point(owner: InstanceId, index: usize) -> Self {
        Self {
            owner,
            slot: Slot::Point(index),
        }
    }

    pub fn edge(owner: InstanceId, index: usize) -> Self {
        Self {
            owner,
            slot: Slot::Edge(index),
        }
    }

    pub fn active_edge(owner: InstanceId) -> Self {
        Self {
            owner,
            slot: Slot::ActiveEdge,
        }
    }
}

/// Endpoint selector for [`SurfaceCommand::MoveEdgeEndpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeEnd {
    Start,
    End,
}

/// A command for the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceCommand {
    CreatePoint {
        id: VisualId,
        at: Point,
    },
    MovePoint {
        id: VisualId,
        to: Point,
    },
    RemovePoint {
        id: VisualId,
    },
    CreateEdge {
        id: VisualId,
        from: Point,
        to: Point,
    },
    MoveEdgeEndpoint {
        id: VisualId,
        end: EdgeEnd,
        to: Point,
    },
    RemoveEdge {
        id: VisualId,
    },
    StartTimer {
        timer: TimerId,
        delay_ms: u64,
    },
    StopTimer {
        timer: TimerId,
    },
    /// Replace the side panel contents.
    ShowPanel {
        html: String,
    },
}

/// Sink for surface commands.
pub trait Surface {
    fn submit(&mut self, command: SurfaceCommand);
}

/// Recording surface, handy for tests and headless replays.
impl Surface for Vec<SurfaceCommand> {
    fn submit(&mut self, command: SurfaceCommand) {
        self.push(command);
    }
}

/// Surface that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn submit(&mut self, _command: SurfaceCommand) {}
}
