//! PlanSketch session replayer.
//!
//! Feeds a recorded JSON session through the floor-plan editor and prints
//! the resulting scene as JSON for a renderer.

mod session;

use clap::{Parser, Subcommand};
use plansketch_core::FloorPlanEditor;
use session::{Session, SessionError, load_config};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "plansketch", about = "Replay PlanSketch editing sessions")]
struct Cli {
    /// Engine config file (JSON). Defaults apply to missing fields.
    #[arg(long, env = "PLANSKETCH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a session file and print the final scene.
    Replay {
        session: PathBuf,
        /// Pretty-print the scene.
        #[arg(long)]
        pretty: bool,
    },
    /// Print the effective engine config.
    Config,
}

fn run(cli: Cli) -> Result<(), SessionError> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Config => {
            println!("{}", config.to_json()?);
        }
        Command::Replay { session, pretty } => {
            let recorded = Session::load(&session)?;
            log::info!("Replaying {} steps from {}", recorded.steps.len(), session.display());

            let mut editor = FloorPlanEditor::with_config(&config);
            recorded.replay(&mut editor)?;

            let scene = editor.scene();
            log::info!(
                "Finished in {:?}: {} outline points, {} objects, {} labels, {} shapes",
                scene.phase,
                scene.outline_points.len(),
                scene.objects.len(),
                scene.labels.len(),
                scene.shapes.len()
            );
            let json = if pretty {
                serde_json::to_string_pretty(&scene)?
            } else {
                serde_json::to_string(&scene)?
            };
            println!("{json}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting PlanSketch");

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
