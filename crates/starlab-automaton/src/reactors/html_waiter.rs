//! Decorator that waits for the panel's `next` link.
//!
//! The waiter adopts whatever reactor was active before it, so the old
//! screen stays on the canvas (and keeps animating) while the user reads
//! the new panel text.

use starlab_core::{InputEvent, Surface};
use tracing::debug;

use crate::error::AutomatonResult;
use crate::reactor::{AnyReactor, ConstructContext, Guard, Reactor, ReactorKind, Transition};
use crate::reactors::parse_target;
use crate::StateMachineBuilder;

/// Link that releases the waiter.
pub const NEXT_LINK: &str = "next";

#[derive(Debug, Default)]
pub struct HtmlWaiterReactor {
    wrapped: Option<Box<AnyReactor>>,
    done: bool,
}

impl HtmlWaiterReactor {
    pub fn new(wrapped: Option<AnyReactor>) -> Self {
        Self {
            wrapped: wrapped.map(Box::new),
            done: false,
        }
    }

    /// Whether `next` has been activated.
    pub fn done(&self) -> bool {
        self.done
    }

    /// The adopted reactor, if there was one.
    pub fn wrapped(&self) -> Option<&AnyReactor> {
        self.wrapped.as_deref()
    }
}

impl Reactor for HtmlWaiterReactor {
    fn kind(&self) -> ReactorKind {
        ReactorKind::HtmlWaiter
    }

    fn handle(&mut self, event: &InputEvent, surface: &mut dyn Surface) -> AutomatonResult<()> {
        if event.link_target() == Some(NEXT_LINK) {
            debug!("waiter_released");
            self.done = true;
            return Ok(());
        }
        match self.wrapped.as_deref_mut() {
            Some(inner) => inner.handle(event, surface),
            None => Ok(()),
        }
    }

    fn reported_transition(&self) -> Option<String> {
        self.done.then(|| NEXT_LINK.to_string())
    }

    fn teardown(&mut self, surface: &mut dyn Surface) {
        if let Some(inner) = self.wrapped.as_deref_mut() {
            inner.teardown(surface);
        }
    }
}

fn construct(_args: &str, ctx: &mut ConstructContext<'_>) -> AutomatonResult<AnyReactor> {
    Ok(AnyReactor::HtmlWaiter(HtmlWaiterReactor::new(
        ctx.previous.take(),
    )))
}

fn done_transition(args: &str) -> AutomatonResult<Transition> {
    Ok(Transition::new(Guard::WaiterDone, parse_target("Done", args)?))
}

pub fn install(builder: &mut StateMachineBuilder) {
    let kind = ReactorKind::HtmlWaiter.script_name();
    builder.add_reactor(kind, construct);
    builder.add_transition(kind, "Done", done_transition);
}
