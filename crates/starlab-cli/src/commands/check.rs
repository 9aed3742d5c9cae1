//! Validate every screen of a lesson bundle.

use anyhow::{bail, Context, Result};
use starlab_automaton::resources::screen_resource;
use starlab_automaton::{AutomatonError, DirectorySource, StateMachineBuilder};

use crate::config::Config;

/// Resolve every screen script and report what fails.
pub fn execute(config: &Config) -> Result<()> {
    let bundle = config.require_bundle()?;
    let source = DirectorySource::load(bundle)
        .with_context(|| format!("Failed to load bundle {}", bundle.display()))?;
    let catalog = StateMachineBuilder::standard(config.start.clone(), source).into_catalog();

    let screens = catalog.screens();
    let mut failures = catalog.check_all();
    if !screens.contains(&config.start) {
        failures.insert(
            0,
            (
                config.start.clone(),
                AutomatonError::ResourceNotFound {
                    name: screen_resource(&config.start),
                },
            ),
        );
    }

    for (screen, error) in &failures {
        eprintln!("✗ {screen}: {error}");
    }
    if failures
        .iter()
        .any(|(_, e)| matches!(e, AutomatonError::UnknownReactor { .. }))
    {
        eprintln!("  known reactors: {}", catalog.reactor_kinds().join(", "));
    }
    if !failures.is_empty() {
        bail!("{} problem(s) in {}", failures.len(), bundle.display());
    }

    println!(
        "✓ {} screens OK in {} (start: {})",
        screens.len(),
        bundle.display(),
        config.start
    );
    Ok(())
}
