//! The script-driven state machine and its builder.
//!
//! Screens are resolved lazily: entering a screen reads its script,
//! expands inclusions, parses it and looks every declared kind up in the
//! registered tables. A screen that cannot be resolved is a fatal error.

use std::collections::HashMap;

use starlab_core::{InputEvent, InstanceId, Surface, SurfaceCommand};
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::{AutomatonError, AutomatonResult};
use crate::observer::{Observer, ObserverRegistry};
use crate::reactor::{
    AnyReactor, ArgsCheck, ConstructContext, Reactor, ReactorConstructor, Transition,
    TransitionConstructor,
};
use crate::reactors::install_standard_reactors;
use crate::resources::{read_expanded, screen_resource, ScriptSource};
use crate::script::parse_screen;

/// A screen with every declaration resolved against the kind tables.
pub struct ResolvedScreen {
    pub name: String,
    /// Expanded side panel HTML.
    pub html: Option<String>,
    pub reactor_kind: String,
    pub reactor_args: String,
    constructor: ReactorConstructor,
    /// Bound transitions, in declaration order.
    pub transitions: Vec<Transition>,
}

/// Script resources plus the immutable kind tables.
pub struct ScreenCatalog {
    source: Box<dyn ScriptSource>,
    reactors: HashMap<String, ReactorConstructor>,
    arg_checks: HashMap<String, ArgsCheck>,
    transitions: HashMap<String, HashMap<String, TransitionConstructor>>,
}

impl ScreenCatalog {
    /// Load, expand, parse and bind one screen.
    pub fn resolve(&self, screen: &str) -> AutomatonResult<ResolvedScreen> {
        let text = read_expanded(self.source.as_ref(), &screen_resource(screen))?;
        let script = parse_screen(screen, &text)?;

        let html = script
            .html
            .as_deref()
            .map(|resource| read_expanded(self.source.as_ref(), resource))
            .transpose()?;

        let kind = script.reactor.kind;
        let constructor =
            *self
                .reactors
                .get(&kind)
                .ok_or_else(|| AutomatonError::UnknownReactor {
                    name: kind.clone(),
                })?;

        let table = self.transitions.get(&kind);
        let transitions = script
            .transitions
            .iter()
            .map(|decl| {
                let build = table.and_then(|t| t.get(&decl.name)).ok_or_else(|| {
                    AutomatonError::UnknownTransition {
                        reactor: kind.clone(),
                        name: decl.name.clone(),
                    }
                })?;
                build(&decl.args)
            })
            .collect::<AutomatonResult<Vec<_>>>()?;

        debug!(
            screen,
            reactor = %kind,
            transitions = transitions.len(),
            "screen_resolved"
        );

        Ok(ResolvedScreen {
            name: screen.to_string(),
            html,
            reactor_kind: kind,
            reactor_args: script.reactor.args,
            constructor,
            transitions,
        })
    }

    /// Every screen script in the bundle.
    pub fn screens(&self) -> Vec<String> {
        self.source.screens()
    }

    /// Resolve every screen, check reactor arguments where the kind has a
    /// checker, and check that every transition target exists. Returns the
    /// failures, keyed by screen.
    pub fn check_all(&self) -> Vec<(String, AutomatonError)> {
        let screens = self.screens();
        let mut failures = Vec::new();

        for screen in &screens {
            match self.resolve(screen) {
                Ok(resolved) => {
                    if let Some(check) = self.arg_checks.get(&resolved.reactor_kind) {
                        if let Err(e) = check(&resolved.reactor_args) {
                            failures.push((screen.clone(), e));
                        }
                    }
                    for transition in &resolved.transitions {
                        if !screens.contains(&transition.target) {
                            failures.push((
                                screen.clone(),
                                AutomatonError::ResourceNotFound {
                                    name: screen_resource(&transition.target),
                                },
                            ));
                        }
                    }
                }
                Err(e) => failures.push((screen.clone(), e)),
            }
        }
        failures
    }

    pub fn reactor_kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.reactors.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

/// Collects constructors, transitions and observers, then builds the
/// machine on its initial screen.
pub struct StateMachineBuilder {
    initial: String,
    config: SessionConfig,
    catalog: ScreenCatalog,
    observers: ObserverRegistry,
}

impl StateMachineBuilder {
    /// An empty builder. Nothing is registered yet.
    pub fn new(initial: impl Into<String>, source: impl ScriptSource + 'static) -> Self {
        Self {
            initial: initial.into(),
            config: SessionConfig::default(),
            catalog: ScreenCatalog {
                source: Box::new(source),
                reactors: HashMap::new(),
                arg_checks: HashMap::new(),
                transitions: HashMap::new(),
            },
            observers: ObserverRegistry::new(),
        }
    }

    /// A builder with every standard reactor kind installed.
    pub fn standard(initial: impl Into<String>, source: impl ScriptSource + 'static) -> Self {
        let mut builder = Self::new(initial, source);
        install_standard_reactors(&mut builder);
        builder
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn add_reactor(&mut self, name: impl Into<String>, constructor: ReactorConstructor) {
        self.catalog.reactors.insert(name.into(), constructor);
    }

    /// Let `check_all` validate this kind's arguments up front.
    pub fn add_args_check(&mut self, name: impl Into<String>, check: ArgsCheck) {
        self.catalog.arg_checks.insert(name.into(), check);
    }

    pub fn add_transition(
        &mut self,
        reactor: impl Into<String>,
        name: impl Into<String>,
        constructor: TransitionConstructor,
    ) {
        self.catalog
            .transitions
            .entry(reactor.into())
            .or_default()
            .insert(name.into(), constructor);
    }

    pub fn add_observer(&mut self, name: impl Into<String>, observer: Box<dyn Observer>) {
        self.observers.register(name, observer);
    }

    /// Just the catalog, for validating a bundle without running it.
    pub fn into_catalog(self) -> ScreenCatalog {
        self.catalog
    }

    /// Enter the initial screen.
    pub fn build(self, surface: &mut dyn Surface) -> AutomatonResult<StateMachine> {
        info!(
            initial = %self.initial,
            reactors = self.catalog.reactors.len(),
            observers = self.observers.len(),
            "state_machine_build"
        );

        let mut machine = StateMachine {
            catalog: self.catalog,
            config: self.config,
            observers: self.observers,
            current_state: String::new(),
            active: None,
            transitions: Vec::new(),
            panel_html: String::new(),
            next_instance: 1,
        };
        machine.set_state(&self.initial, surface)?;
        Ok(machine)
    }
}

/// Holds exactly one active reactor and the transitions of its screen.
pub struct StateMachine {
    catalog: ScreenCatalog,
    config: SessionConfig,
    observers: ObserverRegistry,
    current_state: String,
    active: Option<AnyReactor>,
    transitions: Vec<Transition>,
    panel_html: String,
    next_instance: u64,
}

impl StateMachine {
    /// Deliver one event. Returns the new screen when a transition fired.
    ///
    /// Transitions are evaluated in declaration order and the first match
    /// wins; the rest are not consulted for this event.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        surface: &mut dyn Surface,
    ) -> AutomatonResult<Option<String>> {
        let Some(active) = self.active.as_mut() else {
            return Ok(None);
        };
        active.handle(event, surface)?;

        let Some(target) = self
            .transitions
            .iter()
            .find_map(|t| t.evaluate(active))
            .map(str::to_string)
        else {
            return Ok(None);
        };

        info!(from = %self.current_state, to = %target, "transition_matched");
        self.set_state(&target, surface)?;
        Ok(Some(target))
    }

    fn set_state(&mut self, screen: &str, surface: &mut dyn Surface) -> AutomatonResult<()> {
        let resolved = self.catalog.resolve(screen)?;

        // The panel is committed only once the new reactor exists.
        let declared_html = resolved.html.is_some();
        let mut panel = resolved
            .html
            .unwrap_or_else(|| self.panel_html.clone());

        let instance = InstanceId(self.next_instance);
        self.next_instance += 1;

        let mut previous = self.active.take();
        let mut ctx = ConstructContext {
            instance,
            config: &self.config,
            observers: &self.observers,
            panel_html: &mut panel,
            previous: &mut previous,
            surface: &mut *surface,
        };
        let reactor = match (resolved.constructor)(&resolved.reactor_args, &mut ctx) {
            Ok(reactor) => reactor,
            Err(e) => {
                self.active = previous;
                return Err(e);
            }
        };

        if let Some(mut old) = previous {
            debug!(kind = %old.kind(), "reactor_teardown");
            old.teardown(surface);
        }
        if declared_html || panel != self.panel_html {
            self.panel_html.clone_from(&panel);
            surface.submit(SurfaceCommand::ShowPanel { html: panel });
        }

        info!(
            screen,
            reactor = %resolved.reactor_kind,
            instance = %instance,
            "state_changed"
        );
        self.active = Some(reactor);
        self.transitions = resolved.transitions;
        self.current_state = resolved.name;
        self.observers.notify(screen);
        Ok(())
    }

    /// Name of the current screen.
    pub fn current_state(&self) -> &str {
        &self.current_state
    }

    pub fn active(&self) -> Option<&AnyReactor> {
        self.active.as_ref()
    }

    pub fn observer<T: Observer>(&self, name: &str) -> Option<&T> {
        self.observers.get(name)
    }

    /// Current side panel contents.
    pub fn panel_html(&self) -> &str {
        &self.panel_html
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactor::ReactorKind;
    use crate::resources::MemorySource;

    fn bundle() -> MemorySource {
        MemorySource::new()
            .with_screen("Intro", "Html html/intro.html\nReactor GeneralHTMLReactor\nTransition Link go Wait\n")
            .with_screen("Wait", "Reactor HTMLWaiterReactor\nTransition Done Intro\n")
            .with("html/intro.html", "<p>hello</p>")
    }

    #[test]
    fn test_build_enters_initial_screen() {
        let mut surface = Vec::new();
        let machine = StateMachineBuilder::standard("Intro", bundle())
            .build(&mut surface)
            .unwrap();
        assert_eq!(machine.current_state(), "Intro");
        assert_eq!(machine.panel_html(), "<p>hello</p>");
        assert_eq!(
            surface,
            vec![SurfaceCommand::ShowPanel {
                html: "<p>hello</p>".to_string()
            }]
        );
        assert_eq!(machine.active().map(|r| r.kind()), Some(ReactorKind::GeneralHtml));
    }

    #[test]
    fn test_unknown_initial_screen_is_fatal() {
        let mut surface = Vec::new();
        let err = StateMachineBuilder::standard("Nowhere", bundle())
            .build(&mut surface)
            .err()
            .unwrap();
        assert!(matches!(err, AutomatonError::ResourceNotFound { .. }));
    }

    #[test]
    fn test_unregistered_kinds_are_fatal() {
        let source = MemorySource::new()
            .with_screen("A", "Reactor GeneralHTMLReactor\nTransition Teleport B\n")
            .with_screen("B", "Reactor MysteryReactor\n");
        let catalog = StateMachineBuilder::standard("A", source).into_catalog();

        assert!(matches!(
            catalog.resolve("A").err(),
            Some(AutomatonError::UnknownTransition { .. })
        ));
        assert!(matches!(
            catalog.resolve("B").err(),
            Some(AutomatonError::UnknownReactor { .. })
        ));
        assert_eq!(catalog.check_all().len(), 2);
    }

    #[test]
    fn test_check_all_reports_missing_targets() {
        let source = MemorySource::new()
            .with_screen("A", "Reactor GeneralHTMLReactor\nTransition Link go Missing\n");
        let catalog = StateMachineBuilder::standard("A", source).into_catalog();
        let failures = catalog.check_all();
        assert_eq!(failures.len(), 1);
        assert!(matches!(
            &failures[0].1,
            AutomatonError::ResourceNotFound { name } if name == "states/Missing.state"
        ));
    }

    #[test]
    fn test_check_all_reports_bad_reactor_args() {
        let source = MemorySource::new()
            .with_screen("Draw", "Reactor TabulaRasaReactor {5/x}\n")
            .with_screen("Ring", "Reactor RadialEditorReactor eight\n")
            .with_screen("Spin", "Reactor AligningReactor 7\n")
            .with_screen("Fine", "Reactor AligningReactor 7 2\n");
        let catalog = StateMachineBuilder::standard("Fine", source).into_catalog();

        let failures = catalog.check_all();
        let mut failed: Vec<&str> = failures
            .iter()
            .inspect(|(_, e)| assert!(matches!(e, AutomatonError::InvalidReactorArgs { .. })))
            .map(|(screen, _)| screen.as_str())
            .collect();
        failed.sort_unstable();
        assert_eq!(failed, ["Draw", "Ring", "Spin"]);
    }

    #[test]
    fn test_link_transition_round_trip() {
        let mut surface = Vec::new();
        let mut machine = StateMachineBuilder::standard("Intro", bundle())
            .build(&mut surface)
            .unwrap();

        assert_eq!(
            machine.handle_event(&InputEvent::link("stay"), &mut surface).unwrap(),
            None
        );
        assert_eq!(
            machine.handle_event(&InputEvent::link("go"), &mut surface).unwrap().as_deref(),
            Some("Wait")
        );
        assert_eq!(
            machine.handle_event(&InputEvent::link("next"), &mut surface).unwrap().as_deref(),
            Some("Intro")
        );
    }
}
