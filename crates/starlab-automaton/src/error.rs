//! Error types for the reactor state machine.

use starlab_core::CoreError;
use thiserror::Error;

/// Result type alias for automaton operations.
pub type AutomatonResult<T> = Result<T, AutomatonError>;

/// Errors that can occur while loading scripts or driving reactors.
///
/// Everything here is fatal: configuration mistakes surface at load time,
/// logic violations when they happen. Expected non-matches (duplicate
/// edges, unrecognized drawings, guards that do not fire) are not errors.
#[derive(Debug, Error)]
pub enum AutomatonError {
    /// A script (or the initial screen) named a reactor kind nobody registered.
    #[error("no reactor constructor registered for {name:?}")]
    UnknownReactor { name: String },

    /// A transition kind is not registered for the declared reactor kind.
    #[error("reactor {reactor:?} has no transition named {name:?}")]
    UnknownTransition { reactor: String, name: String },

    /// A screen script line could not be understood.
    #[error("malformed declaration in screen {screen:?}, line {line}: {message}")]
    MalformedDeclaration {
        screen: String,
        line: usize,
        message: String,
    },

    /// A reactor constructor rejected its argument string.
    #[error("invalid arguments {args:?} for reactor {kind}: {message}")]
    InvalidReactorArgs {
        kind: String,
        args: String,
        message: String,
    },

    /// A transition constructor rejected its argument string.
    #[error("invalid arguments {args:?} for transition {name}: {message}")]
    InvalidTransitionArgs {
        name: String,
        args: String,
        message: String,
    },

    /// A script resource does not exist.
    #[error("resource not found: {name}")]
    ResourceNotFound { name: String },

    /// An inclusion marker was opened but never closed.
    #[error("unterminated inclusion marker in {resource}")]
    UnterminatedInclusion { resource: String },

    /// A resource includes itself, directly or transitively.
    #[error("inclusion cycle: {}", chain.join(" -> "))]
    InclusionCycle { chain: Vec<String> },

    /// The summary screen's panel has nowhere to put the visit log.
    #[error("panel html has no completion marker {marker:?}")]
    MissingCompletionMarker { marker: String },

    /// A reactor needs an observer that was never installed.
    #[error("observer not installed: {name}")]
    ObserverMissing { name: String },

    /// Geometry or classification failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// I/O error while loading resources.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
