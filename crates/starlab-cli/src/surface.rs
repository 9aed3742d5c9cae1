//! Headless surface: logs commands and keeps track of running timers.

use std::io::Write;

use starlab_core::{Surface, SurfaceCommand, TimerId};
use tracing::{trace, warn};

/// A surface that prints commands as JSON lines when asked to and
/// remembers which timers are running, so a replay can tick them.
pub struct ConsoleSurface<W: Write> {
    out: Option<W>,
    timers: Vec<TimerId>,
    submitted: usize,
}

impl<W: Write> ConsoleSurface<W> {
    /// `out` receives one JSON object per command; `None` only logs.
    pub fn new(out: Option<W>) -> Self {
        Self {
            out,
            timers: Vec::new(),
            submitted: 0,
        }
    }

    /// Running timers, in start order.
    pub fn running_timers(&self) -> &[TimerId] {
        &self.timers
    }

    /// Commands seen so far.
    pub fn submitted(&self) -> usize {
        self.submitted
    }
}

impl<W: Write> Surface for ConsoleSurface<W> {
    fn submit(&mut self, command: SurfaceCommand) {
        self.submitted += 1;
        match &command {
            SurfaceCommand::StartTimer { timer, .. } if !self.timers.contains(timer) => {
                self.timers.push(*timer);
            }
            SurfaceCommand::StopTimer { timer } => self.timers.retain(|t| t != timer),
            _ => {}
        }

        trace!(?command, "surface_command");
        if let Some(out) = self.out.as_mut() {
            let written = serde_json::to_string(&command)
                .map_err(std::io::Error::from)
                .and_then(|line| writeln!(out, "{line}"));
            if let Err(e) = written {
                warn!(error = %e, "failed to write surface command");
            }
        }
    }
}
