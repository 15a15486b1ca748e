//! Spark CLI
//!
//! Simulate, validate, and inspect spark button animations.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use spark_animation::{Choreography, ChoreographyTiming, SparkController};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod simulate;

use config::SparkFile;
use simulate::Simulation;

#[derive(Parser)]
#[command(name = "spark")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Spark button animation tool", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the controller on a simulated frame clock and print every frame
    Simulate {
        /// spark.toml to read
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Animation speed (overrides the config file)
        #[arg(short, long)]
        speed: Option<f32>,

        /// Frames per second
        #[arg(long)]
        fps: Option<u32>,

        /// Simulated time in milliseconds
        #[arg(short, long)]
        duration: Option<u64>,

        /// Trigger time in milliseconds (repeatable)
        #[arg(short, long = "trigger")]
        triggers: Vec<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Validate a configuration and print the resolved settings
    Check {
        /// spark.toml to read
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the keyframe schedule of every track
    Timings {
        /// Animation speed
        #[arg(short, long, default_value = "1.0")]
        speed: f32,

        /// Choreography preset (full, without-rings, classic)
        #[arg(short, long, default_value = "full")]
        preset: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            config,
            speed,
            fps,
            duration,
            triggers,
            format,
        } => cmd_simulate(config.as_deref(), speed, fps, duration, triggers, format),

        Commands::Check { config } => cmd_check(config.as_deref()),

        Commands::Timings { speed, preset } => cmd_timings(speed, &preset),
    }
}

fn cmd_simulate(
    config_path: Option<&Path>,
    speed: Option<f32>,
    fps: Option<u32>,
    duration: Option<u64>,
    triggers: Vec<u64>,
    format: OutputFormat,
) -> Result<()> {
    let mut file = SparkFile::load(config_path)?;
    if let Some(speed) = speed {
        file.spark.animation_speed = speed;
    }

    let config = file.spark.to_spark_config()?;
    let mut spark = SparkController::new(config).context("Invalid spark configuration")?;

    let simulation = Simulation {
        fps: fps.unwrap_or(file.simulation.fps),
        duration_ms: duration.unwrap_or(file.simulation.duration_ms),
        triggers: if triggers.is_empty() {
            file.simulation.triggers
        } else {
            triggers
        },
    };

    info!(
        "Simulating {} ms at {} fps (speed {})",
        simulation.duration_ms,
        simulation.fps,
        spark.config().animation_speed
    );

    let frames = simulation.run(&mut spark)?;

    match format {
        OutputFormat::Table => {
            println!("{}", simulate::table_header());
            for frame in &frames {
                println!("{}", simulate::table_row(frame));
            }
        }
        OutputFormat::Json => {
            for frame in &frames {
                println!("{}", serde_json::to_string(frame)?);
            }
        }
    }

    Ok(())
}

fn cmd_check(config_path: Option<&Path>) -> Result<()> {
    let file = SparkFile::load(config_path)?;
    let config = file.spark.to_spark_config()?;
    let spark = SparkController::new(config).context("Invalid spark configuration")?;

    match config_path {
        Some(path) => info!("Configuration OK: {}", path.display()),
        None => info!("Configuration OK (defaults)"),
    }

    let config = spark.config();
    println!("Spark configuration");
    println!("===================");
    println!("Primary color:   {}", config.primary_color.to_hex_string());
    println!("Secondary color: {}", config.secondary_color.to_hex_string());
    println!("Speed:           {}", config.animation_speed);
    println!("Mode:            {:?}", config.mode);
    println!("Enabled:         {}", config.enabled);
    println!("Preset:          {}", file.spark.preset);
    println!(
        "Button size:     {} x {}",
        config.button_size.width, config.button_size.height
    );
    println!("Cycle:           {} ms", spark.timing().window_ms());
    println!();
    println!("Resolved spark.toml:");
    print!("{}", file.to_toml()?);

    Ok(())
}

fn cmd_timings(speed: f32, preset: &str) -> Result<()> {
    let Some(choreography) = Choreography::preset(preset) else {
        anyhow::bail!(
            "Unknown preset '{}'. Valid presets: {:?}",
            preset,
            Choreography::PRESETS
        );
    };

    let timing = ChoreographyTiming::new(&choreography, speed)
        .with_context(|| format!("Cannot resolve '{}' at speed {}", preset, speed))?;

    println!("Preset '{}' at speed {}", preset, timing.speed());
    for plan in timing.plans() {
        let snap = plan
            .snap_on_trigger
            .map_or_else(String::new, |v| format!(" snap {}", v));
        let reset = plan
            .reset_after
            .map_or_else(String::new, |v| format!(" reset {}", v));
        println!(
            "{:<15} delay {:>4} ms  end {:>4} ms{}{}",
            plan.track.name(),
            plan.delay_ms,
            plan.end_ms(),
            snap,
            reset
        );
        for keyframe in plan.timeline.keyframes() {
            let overshoot = if keyframe.easing.overshoots() {
                "  (overshoots)"
            } else {
                ""
            };
            println!(
                "    {:>5} ms  {:>5.2}  {:?}{}",
                keyframe.offset_ms, keyframe.value, keyframe.easing, overshoot
            );
        }
    }
    println!("Cycle: {} ms", timing.window_ms());

    Ok(())
}
