//! A panel-only screen that remembers the last link the user followed.

use starlab_core::{InputEvent, Surface};

use crate::error::AutomatonResult;
use crate::reactor::{AnyReactor, ConstructContext, Guard, Reactor, ReactorKind, Transition};
use crate::reactors::parse_link_target;
use crate::StateMachineBuilder;

#[derive(Debug, Default)]
pub struct GeneralHtmlReactor {
    last_link: Option<String>,
}

impl GeneralHtmlReactor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_link_clicked(&self) -> Option<&str> {
        self.last_link.as_deref()
    }
}

impl Reactor for GeneralHtmlReactor {
    fn kind(&self) -> ReactorKind {
        ReactorKind::GeneralHtml
    }

    fn handle(&mut self, event: &InputEvent, _surface: &mut dyn Surface) -> AutomatonResult<()> {
        if let Some(target) = event.link_target() {
            self.last_link = Some(target.to_string());
        }
        Ok(())
    }

    fn reported_transition(&self) -> Option<String> {
        self.last_link.clone()
    }

    fn teardown(&mut self, _surface: &mut dyn Surface) {}
}

fn construct(_args: &str, _ctx: &mut ConstructContext<'_>) -> AutomatonResult<AnyReactor> {
    Ok(AnyReactor::GeneralHtml(GeneralHtmlReactor::new()))
}

fn link_transition(args: &str) -> AutomatonResult<Transition> {
    let (link, target) = parse_link_target("Link", args)?;
    Ok(Transition::new(Guard::LinkClicked(link), target))
}

pub fn install(builder: &mut StateMachineBuilder) {
    let kind = ReactorKind::GeneralHtml.script_name();
    builder.add_reactor(kind, construct);
    builder.add_transition(kind, "Link", link_transition);
}
