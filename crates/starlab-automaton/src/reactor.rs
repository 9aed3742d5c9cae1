//! The reactor abstraction: one interactive screen handler.
//!
//! The engine owns exactly one reactor at a time. Every input event goes to
//! [`Reactor::handle`]; afterwards the engine asks the screen's transitions
//! whether the reactor's state calls for a different screen.
//!
//! Script kind names are strings only at the script boundary. Internally
//! every reactor is one variant of the closed [`AnyReactor`] set, and every
//! guard one variant of [`Guard`].

use std::fmt;

use starlab_core::{InputEvent, InstanceId, Star, Surface};

use crate::config::SessionConfig;
use crate::error::AutomatonResult;
use crate::observer::ObserverRegistry;
use crate::reactors::{
    AligningReactor, GeneralHtmlReactor, HtmlWaiterReactor, RadialEditorReactor, SummaryReactor,
    TabulaRasaReactor,
};

/// Capability contract shared by every screen handler.
pub trait Reactor {
    /// Which variant this is.
    fn kind(&self) -> ReactorKind;

    /// React to one input event. May submit drawing commands.
    fn handle(&mut self, event: &InputEvent, surface: &mut dyn Surface) -> AutomatonResult<()>;

    /// The transition this reactor is asking for, if any.
    fn reported_transition(&self) -> Option<String>;

    /// Release visuals and stop timers. Called when the reactor is replaced
    /// and not adopted by its successor.
    fn teardown(&mut self, surface: &mut dyn Surface);
}

/// Closed set of reactor kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactorKind {
    TabulaRasa,
    RadialEditor,
    Aligning,
    HtmlWaiter,
    GeneralHtml,
    Summary,
}

impl ReactorKind {
    /// Every kind, in registration order.
    pub const ALL: [ReactorKind; 6] = [
        ReactorKind::TabulaRasa,
        ReactorKind::RadialEditor,
        ReactorKind::Aligning,
        ReactorKind::HtmlWaiter,
        ReactorKind::GeneralHtml,
        ReactorKind::Summary,
    ];

    /// Name used in screen scripts.
    pub fn script_name(&self) -> &'static str {
        match self {
            ReactorKind::TabulaRasa => "TabulaRasaReactor",
            ReactorKind::RadialEditor => "RadialEditorReactor",
            ReactorKind::Aligning => "AligningReactor",
            ReactorKind::HtmlWaiter => "HTMLWaiterReactor",
            ReactorKind::GeneralHtml => "GeneralHTMLReactor",
            ReactorKind::Summary => "SummaryReactor",
        }
    }
}

impl fmt::Display for ReactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.script_name())
    }
}

/// The active reactor, as a closed variant set.
#[derive(Debug)]
pub enum AnyReactor {
    TabulaRasa(TabulaRasaReactor),
    RadialEditor(RadialEditorReactor),
    Aligning(AligningReactor),
    HtmlWaiter(HtmlWaiterReactor),
    GeneralHtml(GeneralHtmlReactor),
    Summary(SummaryReactor),
}

macro_rules! delegate {
    ($self:expr, $r:ident => $body:expr) => {
        match $self {
            AnyReactor::TabulaRasa($r) => $body,
            AnyReactor::RadialEditor($r) => $body,
            AnyReactor::Aligning($r) => $body,
            AnyReactor::HtmlWaiter($r) => $body,
            AnyReactor::GeneralHtml($r) => $body,
            AnyReactor::Summary($r) => $body,
        }
    };
}

impl Reactor for AnyReactor {
    fn kind(&self) -> ReactorKind {
        delegate!(self, r => r.kind())
    }

    fn handle(&mut self, event: &InputEvent, surface: &mut dyn Surface) -> AutomatonResult<()> {
        delegate!(self, r => r.handle(event, surface))
    }

    fn reported_transition(&self) -> Option<String> {
        delegate!(self, r => r.reported_transition())
    }

    fn teardown(&mut self, surface: &mut dyn Surface) {
        delegate!(self, r => r.teardown(surface))
    }
}

/// Everything a reactor constructor may use.
pub struct ConstructContext<'a> {
    /// Fresh identity for the reactor being built.
    pub instance: InstanceId,
    pub config: &'a SessionConfig,
    pub observers: &'a ObserverRegistry,
    /// Current side panel contents. Constructors may rewrite it.
    pub panel_html: &'a mut String,
    /// The reactor being replaced. Decorators `take()` it; whatever is left
    /// is torn down by the engine.
    pub previous: &'a mut Option<AnyReactor>,
    pub surface: &'a mut dyn Surface,
}

/// Builds a reactor from its script argument string.
pub type ReactorConstructor =
    fn(args: &str, ctx: &mut ConstructContext<'_>) -> AutomatonResult<AnyReactor>;

/// Validates a reactor's argument string without building the reactor.
pub type ArgsCheck = fn(args: &str) -> AutomatonResult<()>;

/// A predicate over the live reactor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    /// The reactor reports exactly this star's textual form.
    StarFound(Star),
    /// The link-wait gate saw its `next` link.
    WaiterDone,
    /// The aligning animation finished.
    Aligned,
    /// The last activated link has this name.
    LinkClicked(String),
}

impl Guard {
    /// Whether the guard holds for `reactor`. A guard never holds for a
    /// reactor kind it was not written for.
    pub fn holds(&self, reactor: &AnyReactor) -> bool {
        match (self, reactor) {
            (Guard::StarFound(star), r) => {
                r.reported_transition().as_deref() == Some(star.to_string().as_str())
            }
            (Guard::WaiterDone, AnyReactor::HtmlWaiter(w)) => w.done(),
            (Guard::Aligned, AnyReactor::Aligning(a)) => a.done(),
            (Guard::LinkClicked(link), AnyReactor::GeneralHtml(g)) => {
                g.last_link_clicked() == Some(link.as_str())
            }
            _ => false,
        }
    }
}

/// A guard plus the screen it leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub guard: Guard,
    pub target: String,
}

impl Transition {
    pub fn new(guard: Guard, target: impl Into<String>) -> Self {
        Self {
            guard,
            target: target.into(),
        }
    }

    /// The target screen if the guard holds.
    pub fn evaluate(&self, reactor: &AnyReactor) -> Option<&str> {
        self.guard.holds(reactor).then_some(self.target.as_str())
    }
}

/// Builds a transition from its script argument string.
pub type TransitionConstructor = fn(args: &str) -> AutomatonResult<Transition>;
