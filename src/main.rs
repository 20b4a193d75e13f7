#![forbid(unsafe_code)]

mod config;
mod constants;
mod emitter;
mod preset;
mod probe;
mod segments;
mod types;

use anyhow::{Result, bail};
use clap::Parser;
use tracing::{Level as TraceLevel, info, warn};
use tracing_subscriber::FmtSubscriber;

use config::{Cli, Command, PresetTable};
use emitter::Emitter;
use probe::{DeviceProbe, print_device_state};

fn generate(cli: &Cli, no_probe: bool) -> Result<()> {
    // Load the table before touching the device or disk so a bad file fails fast
    let table = PresetTable::resolve(cli.presets.as_deref())?;
    if table.is_empty() {
        warn!("Preset table is empty, only the reserved slot will be written");
    }

    if !no_probe {
        let probe = DeviceProbe::new(&cli.device, cli.timeout());
        print_device_state(&probe);
    }

    let emitter = Emitter::new(&cli.output_dir)?;
    let config = emitter.generate_all(&table)?;

    println!("\nGenerated files:");
    for name in emitter.list_generated()? {
        println!("  - {name}");
    }

    info!(presets = config.presets.len(), slots = ?config.keys(), "Generation complete");
    Ok(())
}

fn init_presets(path: Option<&std::path::Path>, force: bool) -> Result<()> {
    let path = path.map_or_else(PresetTable::default_path, |p| p.to_path_buf());
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    PresetTable::default().save(&path)?;
    println!("Wrote preset table to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    // Logs go to stderr; stdout carries the progress lines
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    info!(?cli, "starting");

    match cli.command() {
        Command::Generate { no_probe } => generate(&cli, no_probe),
        Command::Probe => {
            let probe = DeviceProbe::new(&cli.device, cli.timeout());
            if print_device_state(&probe).is_none() {
                bail!("No state received from {}", probe.url());
            }
            Ok(())
        }
        Command::InitPresets { path, force } => init_presets(path.as_deref(), force),
    }
}
