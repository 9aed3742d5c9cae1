//! Passive listeners notified on every state change.

use std::any::Any;
use std::fmt;

use tracing::trace;

/// A state-change listener.
pub trait Observer: Any {
    /// Called after the state machine enters `state`.
    fn on_state_changed(&mut self, state: &str);

    /// Downcast support for typed lookup.
    fn as_any(&self) -> &dyn Any;
}

/// Records every visited screen, in order.
#[derive(Debug, Clone, Default)]
pub struct HistoryObserver {
    history: Vec<String>,
}

impl HistoryObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visited screens, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Observer for HistoryObserver {
    fn on_state_changed(&mut self, state: &str) {
        self.history.push(state.to_string());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Named observers, notified in registration order.
#[derive(Default)]
pub struct ObserverRegistry {
    entries: Vec<(String, Box<dyn Observer>)>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. A second registration under the same name
    /// replaces the first.
    pub fn register(&mut self, name: impl Into<String>, observer: Box<dyn Observer>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = observer,
            None => self.entries.push((name, observer)),
        }
    }

    /// Look up an observer by name and concrete type.
    pub fn get<T: Observer>(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, o)| o.as_any().downcast_ref::<T>())
    }

    /// Tell every observer about a state change.
    pub fn notify(&mut self, state: &str) {
        for (name, observer) in &mut self.entries {
            trace!(observer = %name, state, "observer_notified");
            observer.on_state_changed(state);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field(
                "observers",
                &self.entries.iter().map(|(n, _)| n).collect::<Vec<_>>(),
            )
            .finish()
    }
}
