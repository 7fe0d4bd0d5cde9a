mod file_io;
mod logging;
mod replay;
mod report;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sensemap_core::config::{DEFAULT_DISCARD_THRESHOLD, DEFAULT_HIT_TOLERANCE};
use sensemap_core::{EditorConfig, MapSession, Rgb, color};

/// Review and script sensory annotations on floor-plan maps
#[derive(Parser, Debug)]
#[command(name = "sensemap")]
#[command(version, about, long_about = None)]
struct Args {
    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a read-only report of a stored map
    Report {
        #[arg(value_name = "MAP")]
        file: PathBuf,
    },
    /// Color for an intensity between 0 and 100
    Encode { intensity: f64 },
    /// Nearest intensity for a #rrggbb color
    Decode { color: String },
    /// Apply a JSON script of tool/pointer/edit steps to a map
    Replay {
        #[arg(value_name = "MAP")]
        file: PathBuf,
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
        /// Where to write the result (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_HIT_TOLERANCE)]
        hit_tolerance: f64,
        #[arg(long, default_value_t = DEFAULT_DISCARD_THRESHOLD)]
        discard_threshold: f64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    match args.command {
        Command::Report { file } => {
            let session = MapSession::from_record(file_io::load_record(&file)?)?;
            print!("{}", report::render_report(&session));
        }
        Command::Encode { intensity } => {
            println!("{}", color::encode(intensity));
        }
        Command::Decode { color: hex } => {
            let rgb: Rgb = hex.parse()?;
            println!("{:.1}", color::decode(rgb));
        }
        Command::Replay {
            file,
            script,
            output,
            hit_tolerance,
            discard_threshold,
        } => {
            let config = EditorConfig {
                hit_tolerance,
                discard_threshold,
            };
            let mut session = MapSession::from_record(file_io::load_record(&file)?)?.with_config(config);
            let steps = fs::read_to_string(&script)
                .with_context(|| format!("Failed to read {}", script.display()))?;
            let steps = replay::parse_script(&steps)
                .with_context(|| format!("Invalid script {}", script.display()))?;

            let summary = replay::replay(&mut session, &steps)?;
            tracing::info!(?summary, "replay finished");

            let record = session.to_record();
            match output {
                Some(path) => file_io::save_record(&path, &record)?,
                None => println!("{}", record.to_json_pretty()?),
            }
        }
    }

    Ok(())
}
