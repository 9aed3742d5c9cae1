//! Freeform drawing surface that recognizes star polygons.
//!
//! The user drops points and connects them by dragging. After every new
//! edge the drawing is classified; when it is one of the permitted stars
//! the surface stops accepting input and animates the drawing into the
//! canonical radial layout. Once the animation finishes it reports the
//! star's text (e.g. `{ 5 / 2 }`) as its transition.

use starlab_core::{
    classify, Edge, InputEvent, InstanceId, Point, Star, Surface, SurfaceCommand, TimerId,
};
use tracing::{debug, info};

use crate::animation::{star_targets, AnimationDriver};
use crate::config::SessionConfig;
use crate::error::{AutomatonError, AutomatonResult};
use crate::reactor::{AnyReactor, ConstructContext, Guard, Reactor, ReactorKind, Transition};
use crate::reactors::drawing::Drawing;
use crate::reactors::parse_star_target;
use crate::StateMachineBuilder;

/// Lifecycle of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Still exploring.
    Drawing,
    /// Tweening into place. Input is ignored.
    Animating,
    /// Finished; frozen.
    Done,
}

/// The freeform star drawing surface.
#[derive(Debug)]
pub struct TabulaRasaReactor {
    instance: InstanceId,
    config: SessionConfig,
    permitted: Vec<Star>,
    drawing: Drawing,
    phase: Phase,
    recognized: Star,
    animation: Option<AnimationDriver>,
}

impl TabulaRasaReactor {
    /// A blank surface that finishes on any of the `permitted` stars.
    pub fn new(instance: InstanceId, config: SessionConfig, permitted: Vec<Star>) -> Self {
        Self {
            instance,
            config,
            permitted,
            drawing: Drawing::new(instance),
            phase: Phase::Drawing,
            recognized: Star::NOT_A_STAR,
            animation: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Classification of the drawing after the last committed edge.
    /// Only meaningful once the phase has left [`Phase::Drawing`].
    pub fn recognized(&self) -> Star {
        self.recognized
    }

    pub fn points(&self) -> &[Point] {
        self.drawing.points()
    }

    pub fn edges(&self) -> &[Edge] {
        self.drawing.edges()
    }

    /// This surface's animation timer.
    pub fn timer(&self) -> TimerId {
        TimerId::of(self.instance)
    }

    /// Animation frames advanced so far.
    pub fn frame(&self) -> usize {
        self.animation.as_ref().map_or(0, AnimationDriver::frame)
    }

    fn press(&mut self, x: f64, y: f64, surface: &mut dyn Surface) {
        let radius = self.config.pick_radius();
        let origin = self.drawing.pick_or_add(x, y, radius, surface);
        self.drawing.begin_edge(origin, surface);
    }

    fn release(&mut self, x: f64, y: f64, surface: &mut dyn Surface) -> AutomatonResult<()> {
        if self.drawing.origin().is_none() {
            return Ok(());
        }

        let radius = self.config.pick_radius();
        let dest = self.drawing.pick_or_add(x, y, radius, surface);
        let Some(edge) = self.drawing.finish_edge(Some(dest), surface) else {
            return Ok(());
        };

        self.recognized = classify(self.drawing.points(), self.drawing.edges())?;
        debug!(
            instance = %self.instance,
            a = edge.a,
            b = edge.b,
            points = self.drawing.points().len(),
            edges = self.drawing.edges().len(),
            star = %self.recognized,
            "edge_committed"
        );

        if self.permitted.contains(&self.recognized) {
            self.start_animation(surface);
        }
        Ok(())
    }

    fn start_animation(&mut self, surface: &mut dyn Surface) {
        let points = self.drawing.points().to_vec();
        let targets = star_targets(&points, &self.config.layout_circle());
        let driver = AnimationDriver::new(points, targets, self.config.total_frames());

        info!(
            instance = %self.instance,
            star = %self.recognized,
            frames = driver.total_frames(),
            "star_recognized"
        );

        self.animation = Some(driver);
        self.phase = Phase::Animating;
        surface.submit(SurfaceCommand::StartTimer {
            timer: self.timer(),
            delay_ms: self.config.timer_delay_ms,
        });
    }

    fn tick(&mut self, timer: TimerId, surface: &mut dyn Surface) {
        if self.phase != Phase::Animating || timer != self.timer() {
            return;
        }
        let Some(driver) = self.animation.as_mut() else {
            return;
        };

        let positions = driver.advance();
        let finished = driver.is_finished();
        self.drawing.move_points(&positions, surface);

        if finished {
            self.phase = Phase::Done;
            surface.submit(SurfaceCommand::StopTimer {
                timer: self.timer(),
            });
            info!(instance = %self.instance, star = %self.recognized, "star_animation_done");
        }
    }
}

impl Reactor for TabulaRasaReactor {
    fn kind(&self) -> ReactorKind {
        ReactorKind::TabulaRasa
    }

    fn handle(&mut self, event: &InputEvent, surface: &mut dyn Surface) -> AutomatonResult<()> {
        match *event {
            InputEvent::Tick { timer } => self.tick(timer, surface),
            _ if self.phase != Phase::Drawing => {}
            InputEvent::Press { x, y } => self.press(x, y, surface),
            InputEvent::Drag { x, y } => self.drawing.drag_edge(x, y, surface),
            InputEvent::Release { x, y } => self.release(x, y, surface)?,
            InputEvent::Link { .. } => {}
        }
        Ok(())
    }

    fn reported_transition(&self) -> Option<String> {
        (self.phase == Phase::Done).then(|| self.recognized.to_string())
    }

    fn teardown(&mut self, surface: &mut dyn Surface) {
        if self.phase == Phase::Animating {
            surface.submit(SurfaceCommand::StopTimer {
                timer: self.timer(),
            });
        }
        self.drawing.remove_visuals(surface);
    }
}

fn parse_args(args: &str) -> AutomatonResult<Vec<Star>> {
    Star::parse_list(args).map_err(|e| AutomatonError::InvalidReactorArgs {
        kind: ReactorKind::TabulaRasa.to_string(),
        args: args.to_string(),
        message: e.to_string(),
    })
}

fn construct(args: &str, ctx: &mut ConstructContext<'_>) -> AutomatonResult<AnyReactor> {
    let permitted = parse_args(args)?;
    Ok(AnyReactor::TabulaRasa(TabulaRasaReactor::new(
        ctx.instance,
        ctx.config.clone(),
        permitted,
    )))
}

fn star_transition(args: &str) -> AutomatonResult<Transition> {
    let (star, target) = parse_star_target("Star", args)?;
    Ok(Transition::new(Guard::StarFound(star), target))
}

/// Register the reactor and its `Star` transition.
pub fn install(builder: &mut StateMachineBuilder) {
    let kind = ReactorKind::TabulaRasa.script_name();
    builder.add_reactor(kind, construct);
    builder.add_args_check(kind, |args| parse_args(args).map(drop));
    builder.add_transition(kind, "Star", star_transition);
}
