//! Script-driven reactor state machine for the Starlab lessons.
//!
//! A lesson is a bundle of screen scripts. Each screen names one reactor
//! (an interactive handler for the canvas and side panel) and the guarded
//! transitions out of it:
//!
//! ```text
//! Html html/pentagram.html
//! Reactor TabulaRasaReactor {5/2}
//! Transition Star { 5 / 2 } Pentagram Found
//! ```
//!
//! The [`StateMachine`] owns exactly one active reactor, feeds it every
//! [`InputEvent`](starlab_core::InputEvent), and after each event takes the
//! first transition whose guard holds.
//!
//! ## Modules
//!
//! - [`reactor`]: the [`Reactor`] contract, the closed [`AnyReactor`] set, guards
//! - [`reactors`]: the standard reactor kinds
//! - [`animation`]: tweening a drawing into the canonical layout
//! - [`resources`]: named text resources with `<!-- Inject NAME -->` inclusion
//! - [`script`]: the screen script parser
//! - [`observer`]: state-change listeners

pub mod animation;
pub mod config;
mod error;
mod machine;
pub mod observer;
pub mod reactor;
pub mod reactors;
pub mod resources;
pub mod script;

pub use config::SessionConfig;
pub use error::{AutomatonError, AutomatonResult};
pub use machine::{ResolvedScreen, ScreenCatalog, StateMachine, StateMachineBuilder};
pub use observer::{HistoryObserver, Observer, ObserverRegistry};
pub use reactor::{AnyReactor, Guard, Reactor, ReactorKind, Transition};
pub use reactors::install_standard_reactors;
pub use resources::{DirectorySource, MemorySource, ScriptSource};
