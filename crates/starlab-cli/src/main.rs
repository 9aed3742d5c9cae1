//! Starlab CLI - headless driver for star polygon lesson bundles.
//!
//! Replays input event traces through a bundle's screen scripts, validates
//! bundles, and classifies drawings.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod surface;

use commands::{check, classify, config as config_cmd, run};
use config::Config;

/// Starlab - discover star polygons one screen at a time.
#[derive(Parser, Debug)]
#[command(
    name = "starlab",
    author,
    version,
    about = "Starlab: drive star polygon lessons from the command line",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every command that opens a bundle.
#[derive(clap::Args, Debug)]
struct BundleArgs {
    /// Lesson bundle directory (contains `states/`).
    #[arg(short, long)]
    bundle: Option<PathBuf>,

    /// Screen to start on.
    #[arg(short, long)]
    start: Option<String>,

    /// Animation length in milliseconds.
    #[arg(long)]
    animation_ms: Option<u64>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON-lines event trace through a bundle.
    ///
    /// Each line is one input event, e.g.
    /// `{"type":"press","x":120,"y":80}` or `{"type":"link","target":"next"}`.
    Run {
        #[command(flatten)]
        bundle: BundleArgs,

        /// Event trace file (reads stdin when omitted).
        #[arg(short, long)]
        events: Option<PathBuf>,

        /// Print every surface command as a JSON line.
        #[arg(long)]
        commands: bool,

        /// Tick running animation timers to completion after each event.
        #[arg(long)]
        auto_tick: bool,
    },

    /// Check that every screen in a bundle resolves.
    Check {
        #[command(flatten)]
        bundle: BundleArgs,
    },

    /// Classify a drawing: `{"points": [[x, y], ...], "edges": [[a, b], ...]}`.
    Classify {
        /// Drawing file.
        file: PathBuf,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the effective configuration.
    Show,

    /// Print the effective configuration as JSON.
    Dump,

    /// Show path to config file.
    Path,
}

impl BundleArgs {
    /// Flags take precedence over everything else.
    fn apply(&self, config: &mut Config) {
        if let Some(bundle) = &self.bundle {
            config.bundle = Some(bundle.clone());
        }
        if let Some(start) = &self.start {
            config.start = start.clone();
        }
        if let Some(ms) = self.animation_ms {
            config.session.animation_ms = ms;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN // Default to less noise
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    // Load configuration
    let mut config = Config::load()?;

    match cli.command {
        Commands::Run {
            bundle,
            events,
            commands,
            auto_tick,
        } => {
            bundle.apply(&mut config);
            let options = run::RunOptions {
                events: events.as_deref(),
                print_commands: commands,
                auto_tick,
            };
            run::execute(&config, &options)?;
        }

        Commands::Check { bundle } => {
            bundle.apply(&mut config);
            check::execute(&config)?;
        }

        Commands::Classify { file, json } => {
            classify::execute(&file, json)?;
        }

        Commands::Config(config_cmd_inner) => match config_cmd_inner {
            ConfigCommands::Show => config_cmd::show(&config)?,
            ConfigCommands::Dump => config_cmd::dump(&config)?,
            ConfigCommands::Path => {
                if let Some(path) = Config::config_file_path() {
                    println!("{}", path.display());
                } else {
                    println!("(no config file path available)");
                }
            }
        },
    }

    Ok(())
}
