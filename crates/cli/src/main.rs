#![deny(unsafe_code)]
//! CLI binary for the neural-backdrop.
//!
//! Subcommands:
//! - `render`: run the frame loop headless for N frames, write a PNG
//! - `info`: print the effective config, its schema, and the particle count

mod error;

use clap::{ArgAction, Parser, Subcommand};
use error::CliError;
use flexi_logger::{Logger, LoggerHandle};
use neural_backdrop_core::{AnimationDriver, BackdropConfig, Rgb, SimulationState};
use neural_backdrop_raster::{run_frames, snapshot, PixelSurface};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "neural-backdrop", about = "Neural-network particle backdrop renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the animation for N frames and write the last one as a PNG.
    Render {
        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 1280)]
        width: usize,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 720)]
        height: usize,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 120)]
        frames: usize,

        /// PRNG seed for the particle field.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Pointer position as "x,y"; omit to render with no pointer.
        #[arg(short, long)]
        pointer: Option<String>,

        /// JSON file with config overrides.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Keep the background transparent instead of the page's night color.
        #[arg(long)]
        transparent: bool,

        /// Output file path.
        #[arg(short, long, default_value = "backdrop.png")]
        output: PathBuf,
    },
    /// Print the effective config, its schema, and the particle count.
    Info {
        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 1280)]
        width: usize,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 720)]
        height: usize,

        /// JSON file with config overrides.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) -> Option<LoggerHandle> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    match Logger::try_with_env_or_str(level).and_then(|logger| logger.log_to_stderr().start()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("warning: logging disabled: {e}");
            None
        }
    }
}

/// Parses `"x,y"` into surface coordinates.
fn parse_pointer(raw: &str) -> Result<(f64, f64), CliError> {
    let bad = || CliError::Pointer(raw.to_owned());
    let (x, y) = raw.split_once(',').ok_or_else(bad)?;
    let x: f64 = x.trim().parse().map_err(|_| bad())?;
    let y: f64 = y.trim().parse().map_err(|_| bad())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(bad());
    }
    Ok((x, y))
}

/// Default config, or the defaults overridden by a JSON file.
fn load_config(path: Option<&Path>) -> Result<BackdropConfig, CliError> {
    let Some(path) = path else {
        return Ok(BackdropConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("reading {}: {e}", path.display())))?;
    let params: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| CliError::ConfigSyntax {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let config = BackdropConfig::from_json(&params)?;
    log::info!("loaded config overrides from {}", path.display());
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Info {
            width,
            height,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let count = config.particle_count(width as f64, height as f64);
            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "particles": count,
                    "params": config.params(),
                    "schema": BackdropConfig::param_schema(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Surface: {width}x{height} -> {count} particles");
                println!("Params:");
                if let Some(params) = config.params().as_object() {
                    for (key, value) in params {
                        println!("  {key} = {value}");
                    }
                }
            }
        }
        Command::Render {
            width,
            height,
            frames,
            seed,
            pointer,
            config,
            transparent,
            output,
        } => {
            let pointer = pointer.as_deref().map(parse_pointer).transpose()?;
            let config = load_config(config.as_deref())?;

            let state = SimulationState::new(config, width as f64, height as f64, seed)?;
            let particles = state.field().len();
            let mut driver = AnimationDriver::new(state);
            driver.start();
            if let Some((x, y)) = pointer {
                driver.pointer_moved(x, y);
            }

            let mut surface = PixelSurface::new(width, height)?;
            let drawn = run_frames(&mut driver, &mut surface, frames);

            let background = (!transparent).then_some(Rgb::NIGHT);
            snapshot::write_png(&surface, background, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "frames": drawn,
                    "particles": particles,
                    "seed": seed,
                    "pointer": pointer.map(|(x, y)| [x, y]),
                    "output": output.display().to_string(),
                    "field": driver.state().snapshot_json(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {particles} particles ({width}x{height}, {drawn} frames, seed {seed}) -> {}",
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
