//! Replay an event trace through a lesson bundle.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Stdout};
use std::path::Path;

use anyhow::{Context, Result};
use starlab_automaton::{DirectorySource, StateMachine, StateMachineBuilder};
use starlab_core::InputEvent;
use tracing::{info, info_span, warn};

use crate::config::Config;
use crate::surface::ConsoleSurface;

/// Ticks delivered for one event before giving up on a timer.
const MAX_AUTO_TICKS: usize = 100_000;

/// Options for a replay.
#[derive(Debug, Clone, Default)]
pub struct RunOptions<'a> {
    /// JSON lines file of events; stdin when `None`.
    pub events: Option<&'a Path>,
    /// Print every surface command as a JSON line.
    pub print_commands: bool,
    /// After each event, tick running timers until they stop.
    pub auto_tick: bool,
}

/// Build the engine on the start screen and feed it every event.
pub fn execute(config: &Config, options: &RunOptions<'_>) -> Result<()> {
    let bundle = config.require_bundle()?;
    let _span = info_span!("replay", bundle = %bundle.display(), start = %config.start).entered();
    let source = DirectorySource::load(bundle)
        .with_context(|| format!("Failed to load bundle {}", bundle.display()))?;

    let out = options.print_commands.then(io::stdout);
    let mut surface = ConsoleSurface::new(out);
    let mut machine = StateMachineBuilder::standard(config.start.clone(), source)
        .with_config(config.session.clone())
        .build(&mut surface)
        .with_context(|| format!("Failed to enter start screen {:?}", config.start))?;
    report_state(machine.current_state(), options.print_commands);

    let reader: Box<dyn BufRead> = match options.events {
        Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
            format!("Failed to open event trace {}", path.display())
        })?)),
        None => Box::new(io::stdin().lock()),
    };

    let mut delivered = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read event trace")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event: InputEvent = serde_json::from_str(line)
            .with_context(|| format!("Invalid event on line {}", index + 1))?;

        deliver(&mut machine, &event, &mut surface, options.print_commands)?;
        delivered += 1;
        if options.auto_tick {
            delivered += drain_timers(&mut machine, &mut surface, options.print_commands)?;
        }
    }

    info!(
        events = delivered,
        commands = surface.submitted(),
        state = %machine.current_state(),
        "replay_finished"
    );
    if !options.print_commands {
        println!(
            "Finished on {} after {} events ({} surface commands)",
            machine.current_state(),
            delivered,
            surface.submitted()
        );
    }
    Ok(())
}

fn deliver(
    machine: &mut StateMachine,
    event: &InputEvent,
    surface: &mut ConsoleSurface<Stdout>,
    json: bool,
) -> Result<()> {
    if let Some(screen) = machine
        .handle_event(event, surface)
        .with_context(|| format!("Failed to handle {event:?} on {}", machine.current_state()))?
    {
        report_state(&screen, json);
    }
    Ok(())
}

/// Tick the oldest running timer until none are left. Returns the number
/// of ticks delivered.
fn drain_timers(
    machine: &mut StateMachine,
    surface: &mut ConsoleSurface<Stdout>,
    json: bool,
) -> Result<usize> {
    let mut ticks = 0;
    while let Some(&timer) = surface.running_timers().first() {
        if ticks == MAX_AUTO_TICKS {
            warn!(timer = timer.0, ticks, "timer never stopped, giving up");
            break;
        }
        deliver(machine, &InputEvent::Tick { timer }, surface, json)?;
        ticks += 1;
    }
    Ok(ticks)
}

fn report_state(screen: &str, json: bool) {
    if json {
        println!("{}", serde_json::json!({ "state": screen }));
    } else {
        println!("→ {screen}");
    }
}
