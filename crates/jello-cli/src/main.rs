//! Jello CLI — simulate, validate and inspect.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "jello")]
#[command(version, about = "Jello — corotational FEM soft-body simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from a config file or a preset.
    Simulate {
        /// Path to simulation config (TOML). Takes precedence over --preset.
        #[arg(short, long)]
        config: Option<String>,

        /// Built-in configuration (default, rubber, implicit, debug, constrained_top).
        #[arg(short, long, default_value = "default")]
        preset: String,

        /// Collision scene preset (ground, plinko, bulldoze, empty), replacing the configured scene.
        #[arg(short, long)]
        scene: Option<String>,

        /// Override the output directory.
        #[arg(short, long)]
        output: Option<String>,

        /// Override the number of frames after frame 0.
        #[arg(short, long)]
        frames: Option<u32>,
    },

    /// Validate a config file (.toml) or a TetGen mesh (base path, .node or .ele).
    Validate {
        /// Path to config or mesh.
        path: String,
    },

    /// Inspect a JSON animation or a binary frame snapshot.
    Inspect {
        /// Path to .json or .bin file.
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            config,
            preset,
            scene,
            output,
            frames,
        } => commands::simulate(commands::SimulateArgs {
            config: config.as_deref(),
            preset: &preset,
            scene: scene.as_deref(),
            output: output.as_deref(),
            frames,
        }),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Inspect { path } => commands::inspect(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
