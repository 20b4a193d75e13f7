//! Command line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{config, device};

/// Generate WLED preset files for qmk layer indicators
#[derive(Debug, Parser)]
#[command(name = "wled-presetgen", version, about)]
pub struct Cli {
    /// Directory the JSON files are written to
    #[arg(short, long, global = true, default_value = config::DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// WLED controller host (optionally host:port)
    #[arg(long, global = true, default_value = device::DEFAULT_HOST)]
    pub device: String,

    /// Timeout for the device state request
    #[arg(long, global = true, default_value_t = device::DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Preset table (TOML); defaults to the user config file, then the built-in table
    #[arg(short, long, global = true)]
    pub presets: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Probe the device, then write all preset files (default)
    Generate {
        /// Skip the device state request
        #[arg(long)]
        no_probe: bool,
    },
    /// Fetch and print the device state only
    Probe,
    /// Write the built-in preset table as TOML for editing
    InitPresets {
        /// Destination (defaults to the user config directory)
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Subcommand to run; bare invocation generates with probing enabled
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Generate { no_probe: false })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["wled-presetgen"]).unwrap();
        assert_eq!(cli.output_dir, PathBuf::from("src/generated_configs"));
        assert_eq!(cli.device, "192.168.86.43");
        assert_eq!(cli.timeout(), Duration::from_secs(5));
        assert_eq!(cli.presets, None);
        assert_eq!(cli.command(), Command::Generate { no_probe: false });
    }

    #[test]
    fn test_generate_no_probe() {
        let cli = Cli::try_parse_from(["wled-presetgen", "generate", "--no-probe", "-o", "out"]).unwrap();
        assert_eq!(cli.command(), Command::Generate { no_probe: true });
        assert_eq!(cli.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_probe_with_device() {
        let cli = Cli::try_parse_from(["wled-presetgen", "--device", "10.0.0.5:8080", "probe"]).unwrap();
        assert_eq!(cli.command(), Command::Probe);
        assert_eq!(cli.device, "10.0.0.5:8080");
    }

    #[test]
    fn test_init_presets() {
        let cli = Cli::try_parse_from(["wled-presetgen", "init-presets", "table.toml", "--force"]).unwrap();
        assert_eq!(
            cli.command(),
            Command::InitPresets {
                path: Some(PathBuf::from("table.toml")),
                force: true,
            }
        );
    }

    #[test]
    fn test_rejects_bad_timeout() {
        assert!(Cli::try_parse_from(["wled-presetgen", "--timeout-secs", "soon"]).is_err());
    }
}
