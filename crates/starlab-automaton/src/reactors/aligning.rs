//! Animates a star from a half-step rotation into the canonical layout.

use std::f64::consts::PI;

use starlab_core::geometry::canonical_angles;
use starlab_core::{InputEvent, InstanceId, Point, Star, Surface, SurfaceCommand, TimerId};
use tracing::info;

use crate::animation::AnimationDriver;
use crate::config::SessionConfig;
use crate::error::{AutomatonError, AutomatonResult};
use crate::reactor::{AnyReactor, ConstructContext, Guard, Reactor, ReactorKind, Transition};
use crate::reactors::drawing::Drawing;
use crate::reactors::parse_target;
use crate::StateMachineBuilder;

/// Transition name reported once the animation finishes.
pub const ALIGNED: &str = "aligned";

#[derive(Debug)]
pub struct AligningReactor {
    instance: InstanceId,
    star: Star,
    drawing: Drawing,
    animation: AnimationDriver,
    done: bool,
}

impl AligningReactor {
    /// Draw `star` rotated half a step and start the timer.
    pub fn new(
        instance: InstanceId,
        config: &SessionConfig,
        star: Star,
        surface: &mut dyn Surface,
    ) -> Self {
        let n = star.num_points;
        let circle = config.layout_circle();
        let targets = circle.place(&canonical_angles(n));
        let half_step = PI / n as f64;
        let starts: Vec<f64> = canonical_angles(n).iter().map(|a| a + half_step).collect();

        let mut drawing = Drawing::new(instance);
        for at in circle.place(&starts) {
            drawing.add_point(at, surface);
        }
        if n > 1 {
            for i in 0..n {
                drawing.connect(i, (i + star.step_size) % n, surface);
            }
        }

        let animation =
            AnimationDriver::new(drawing.points().to_vec(), targets, config.total_frames());
        surface.submit(SurfaceCommand::StartTimer {
            timer: TimerId::of(instance),
            delay_ms: config.timer_delay_ms,
        });

        Self {
            instance,
            star,
            drawing,
            animation,
            done: false,
        }
    }

    /// Whether the star has reached the canonical layout.
    pub fn done(&self) -> bool {
        self.done
    }

    pub fn star(&self) -> Star {
        self.star
    }

    pub fn points(&self) -> &[Point] {
        self.drawing.points()
    }
}

impl Reactor for AligningReactor {
    fn kind(&self) -> ReactorKind {
        ReactorKind::Aligning
    }

    fn handle(&mut self, event: &InputEvent, surface: &mut dyn Surface) -> AutomatonResult<()> {
        let timer = TimerId::of(self.instance);
        if self.done || *event != (InputEvent::Tick { timer }) {
            return Ok(());
        }

        let positions = self.animation.advance();
        self.drawing.move_points(&positions, surface);
        if self.animation.is_finished() {
            self.done = true;
            surface.submit(SurfaceCommand::StopTimer { timer });
            info!(instance = %self.instance, star = %self.star, "star_aligned");
        }
        Ok(())
    }

    fn reported_transition(&self) -> Option<String> {
        self.done.then(|| ALIGNED.to_string())
    }

    fn teardown(&mut self, surface: &mut dyn Surface) {
        if !self.done {
            surface.submit(SurfaceCommand::StopTimer {
                timer: TimerId::of(self.instance),
            });
        }
        self.drawing.remove_visuals(surface);
    }
}

fn parse_args(args: &str) -> AutomatonResult<Star> {
    let invalid = |message: &str| AutomatonError::InvalidReactorArgs {
        kind: ReactorKind::Aligning.to_string(),
        args: args.to_string(),
        message: message.to_string(),
    };

    let numbers: Vec<usize> = args
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| invalid("expected two whole numbers"))?;
    let [points, step] = numbers[..] else {
        return Err(invalid("expected POINTS STEP"));
    };
    if points < 2 || step == 0 || step >= points {
        return Err(invalid("step must lie strictly between 0 and the point count"));
    }
    Ok(Star::new(points, step))
}

fn construct(args: &str, ctx: &mut ConstructContext<'_>) -> AutomatonResult<AnyReactor> {
    let star = parse_args(args)?;
    Ok(AnyReactor::Aligning(AligningReactor::new(
        ctx.instance,
        ctx.config,
        star,
        ctx.surface,
    )))
}

fn done_transition(args: &str) -> AutomatonResult<Transition> {
    Ok(Transition::new(Guard::Aligned, parse_target("Done", args)?))
}

pub fn install(builder: &mut StateMachineBuilder) {
    let kind = ReactorKind::Aligning.script_name();
    builder.add_reactor(kind, construct);
    builder.add_args_check(kind, |args| parse_args(args).map(drop));
    builder.add_transition(kind, "Done", done_transition);
}
