//! Closing screen: stamps the visit log into the panel.

use starlab_core::{InputEvent, Surface};
use tracing::info;

use crate::error::{AutomatonError, AutomatonResult};
use crate::observer::HistoryObserver;
use crate::reactor::{AnyReactor, ConstructContext, Reactor, ReactorKind};
use crate::StateMachineBuilder;

/// Panel placeholder replaced by the visit log.
pub const COMPLETION_MARKER: &str = "<!-- CompletionCode -->";

/// Name the visit history observer is registered under.
pub const HISTORY_OBSERVER: &str = "SummaryReactorHistory";

/// Inert once built. All of its work happens at construction.
#[derive(Debug)]
pub struct SummaryReactor {
    visits: Vec<String>,
}

impl SummaryReactor {
    /// Rewrite `panel_html` with the visit log in place of the marker.
    pub fn new(visits: Vec<String>, panel_html: &mut String) -> AutomatonResult<Self> {
        let Some(at) = panel_html.find(COMPLETION_MARKER) else {
            return Err(AutomatonError::MissingCompletionMarker {
                marker: COMPLETION_MARKER.to_string(),
            });
        };

        let log = format!("<div class=\"visit-log\">{}</div>", visits.join(" / "));
        panel_html.replace_range(at..at + COMPLETION_MARKER.len(), &log);
        info!(visits = visits.len(), "summary_shown");

        Ok(Self { visits })
    }

    /// Screens visited before this one, oldest first.
    pub fn visits(&self) -> &[String] {
        &self.visits
    }
}

impl Reactor for SummaryReactor {
    fn kind(&self) -> ReactorKind {
        ReactorKind::Summary
    }

    fn handle(&mut self, _event: &InputEvent, _surface: &mut dyn Surface) -> AutomatonResult<()> {
        Ok(())
    }

    fn reported_transition(&self) -> Option<String> {
        None
    }

    fn teardown(&mut self, _surface: &mut dyn Surface) {}
}

fn construct(_args: &str, ctx: &mut ConstructContext<'_>) -> AutomatonResult<AnyReactor> {
    let history = ctx
        .observers
        .get::<HistoryObserver>(HISTORY_OBSERVER)
        .ok_or_else(|| AutomatonError::ObserverMissing {
            name: HISTORY_OBSERVER.to_string(),
        })?;
    let visits = history.history().to_vec();
    let reactor = SummaryReactor::new(visits, ctx.panel_html)?;
    Ok(AnyReactor::Summary(reactor))
}

/// Register the reactor and the visit history observer it reads.
pub fn install(builder: &mut StateMachineBuilder) {
    builder.add_reactor(ReactorKind::Summary.script_name(), construct);
    builder.add_observer(HISTORY_OBSERVER, Box::new(HistoryObserver::new()));
}
