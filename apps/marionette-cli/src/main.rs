mod config;
mod session;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::MarionetteConfig;
use marionette_kernel::{Figure, PoseCommand};
use marionette_render::RetainedScene;
use marionette_tools::FigureInspector;
use session::{Session, parse_key_script};

#[derive(Parser)]
#[command(name = "marionette", about = "Pose an articulated figure from the command line")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file (.yaml, .yml or .json) with figure params, keymap and step
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Drive the figure with a key script, one frame per comma
    Pose {
        /// Frames separated by `,`; keys held together joined by `+`
        #[arg(short, long, default_value = "")]
        keys: String,
        /// Print the redrawn scene after every frame, not just the last
        #[arg(long)]
        every_frame: bool,
        /// Dump the pose event log as JSON at the end
        #[arg(long)]
        events: bool,
    },
    /// Apply pose commands directly and print every segment's placement
    Inspect {
        /// Command such as `move 0.1`, `turn 0.5` or `rotate leftArm 0.3 x`
        #[arg(short = 'x', long = "exec")]
        commands: Vec<String>,
    },
    /// Check that a recorded pose replays to the same placement
    Replay {
        /// Command to record before replaying; may repeat
        #[arg(short = 'x', long = "exec")]
        commands: Vec<String>,
    },
    /// Print the effective configuration as YAML
    Params,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => MarionetteConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MarionetteConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("marionette v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", marionette_common::crate_info());
            println!("input: {}", marionette_input::crate_info());
            println!("render: {}", marionette_render::crate_info());
            println!("tools: {}", marionette_tools::crate_info());
        }
        Commands::Pose {
            keys,
            every_frame,
            events,
        } => {
            let mut session = Session::new(config)?;
            let mut last = session.redraw();
            for (i, frame) in parse_key_script(&keys).iter().enumerate() {
                let (command, drawn) = session.frame(frame.iter().map(String::as_str))?;
                if every_frame {
                    match command {
                        Some(c) => println!("-- frame {} [{}]: {c}", i + 1, session.selected()),
                        None => println!("-- frame {} [{}]", i + 1, session.selected()),
                    }
                    print!("{drawn}");
                }
                last = drawn;
            }
            if !every_frame {
                print!("{last}");
            }
            println!("{}", FigureInspector::summary(&session.figure));
            if events {
                println!("{}", serde_json::to_string_pretty(session.figure.events())?);
            }
        }
        Commands::Inspect { commands } => {
            let mut session = Session::new(config)?;
            for command in parse_commands(&commands)? {
                session.apply(command)?;
            }
            println!("{}", FigureInspector::summary(&session.figure));
            for info in FigureInspector::inspect_all(&session.figure) {
                println!("  {info}");
            }
        }
        Commands::Replay { commands } => {
            let mut scene = RetainedScene::new();
            let mut figure = Figure::build(config.figure.clone(), &mut scene)?;
            for command in parse_commands(&commands)? {
                figure.apply(command, &mut scene)?;
            }

            let mut replay_scene = RetainedScene::new();
            let replayed = Figure::replay(config.figure, figure.events(), &mut replay_scene)?;
            let matches = figure
                .segments()
                .iter()
                .zip(replayed.segments())
                .all(|(a, b)| a.world() == b.world());
            println!("Recorded: {}", FigureInspector::summary(&figure));
            println!("Replayed: {}", FigureInspector::summary(&replayed));
            println!("Match: {}", if matches { "OK" } else { "MISMATCH" });
            if !matches {
                anyhow::bail!("replayed pose diverged from the recorded one");
            }
        }
        Commands::Params => {
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}

fn parse_commands(raw: &[String]) -> anyhow::Result<Vec<PoseCommand>> {
    raw.iter()
        .map(|s| {
            s.parse::<PoseCommand>()
                .with_context(|| format!("parsing command {s:?}"))
        })
        .collect()
}
