//! Fixed points on the canonical circle for the user to connect.

use starlab_core::geometry::canonical_angles;
use starlab_core::{classify, Edge, InputEvent, InstanceId, Point, Star, Surface};
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::{AutomatonError, AutomatonResult};
use crate::reactor::{AnyReactor, ConstructContext, Guard, Reactor, ReactorKind, Transition};
use crate::reactors::drawing::Drawing;
use crate::reactors::parse_star_target;
use crate::StateMachineBuilder;

/// Link that wipes every edge.
pub const RESET_LINK: &str = "reset";

/// Editor over `n` evenly spaced points. Edges may only join existing
/// points; the drawing is classified after every new edge.
#[derive(Debug)]
pub struct RadialEditorReactor {
    instance: InstanceId,
    pick_radius: f64,
    drawing: Drawing,
    star: Star,
}

impl RadialEditorReactor {
    pub fn new(
        instance: InstanceId,
        config: &SessionConfig,
        num_points: usize,
        surface: &mut dyn Surface,
    ) -> Self {
        let mut drawing = Drawing::new(instance);
        let layout = config.layout_circle().place(&canonical_angles(num_points));
        for at in layout {
            drawing.add_point(at, surface);
        }
        Self {
            instance,
            pick_radius: config.pick_radius(),
            drawing,
            star: Star::NOT_A_STAR,
        }
    }

    /// Classification after the last committed edge.
    pub fn star(&self) -> Star {
        self.star
    }

    pub fn points(&self) -> &[Point] {
        self.drawing.points()
    }

    pub fn edges(&self) -> &[Edge] {
        self.drawing.edges()
    }
}

impl Reactor for RadialEditorReactor {
    fn kind(&self) -> ReactorKind {
        ReactorKind::RadialEditor
    }

    fn handle(&mut self, event: &InputEvent, surface: &mut dyn Surface) -> AutomatonResult<()> {
        match event {
            InputEvent::Press { x, y } => {
                if let Some(origin) = self.drawing.pick(*x, *y, self.pick_radius) {
                    self.drawing.begin_edge(origin, surface);
                }
            }
            InputEvent::Drag { x, y } => self.drawing.drag_edge(*x, *y, surface),
            InputEvent::Release { x, y } => {
                let dest = self.drawing.pick(*x, *y, self.pick_radius);
                if self.drawing.finish_edge(dest, surface).is_some() {
                    self.star = classify(self.drawing.points(), self.drawing.edges())?;
                    debug!(
                        instance = %self.instance,
                        edges = self.drawing.edges().len(),
                        star = %self.star,
                        "radial_edge_committed"
                    );
                }
            }
            InputEvent::Link { target } if target == RESET_LINK => {
                self.drawing.clear_edges(surface);
                self.star = Star::NOT_A_STAR;
                debug!(instance = %self.instance, "radial_reset");
            }
            InputEvent::Link { .. } | InputEvent::Tick { .. } => {}
        }
        Ok(())
    }

    fn reported_transition(&self) -> Option<String> {
        self.star.is_star().then(|| self.star.to_string())
    }

    fn teardown(&mut self, surface: &mut dyn Surface) {
        self.drawing.remove_visuals(surface);
    }
}

fn parse_args(args: &str) -> AutomatonResult<usize> {
    let invalid = |message: &str| AutomatonError::InvalidReactorArgs {
        kind: ReactorKind::RadialEditor.to_string(),
        args: args.to_string(),
        message: message.to_string(),
    };
    let num_points: usize = args
        .trim()
        .parse()
        .map_err(|_| invalid("expected a point count"))?;
    if num_points < 2 {
        return Err(invalid("need at least two points"));
    }
    Ok(num_points)
}

fn construct(args: &str, ctx: &mut ConstructContext<'_>) -> AutomatonResult<AnyReactor> {
    let num_points = parse_args(args)?;
    Ok(AnyReactor::RadialEditor(RadialEditorReactor::new(
        ctx.instance,
        ctx.config,
        num_points,
        ctx.surface,
    )))
}

fn star_transition(args: &str) -> AutomatonResult<Transition> {
    let (star, target) = parse_star_target("Star", args)?;
    Ok(Transition::new(Guard::StarFound(star), target))
}

pub fn install(builder: &mut StateMachineBuilder) {
    let kind = ReactorKind::RadialEditor.script_name();
    builder.add_reactor(kind, construct);
    builder.add_args_check(kind, |args| parse_args(args).map(drop));
    builder.add_transition(kind, "Star", star_transition);
}
