mod cli;
mod file;

pub use cli::{Cli, Command};
use file::FileConfig;

use crate::device::DeviceVariant;
use crate::error::Error;
use crate::frame::MAX_POSITION;
use crate::tracker::{
    TrackerConfig, DEFAULT_MOVEMENT_BITSHIFT, DEFAULT_POSITION_CHANGE_THRESHOLD,
    DEFAULT_WEIGHT_THRESHOLD,
};

/// Merged configuration from CLI args and TOML file.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: String,
    pub variant: DeviceVariant,
    pub tracker: TrackerConfig,
}

impl Config {
    /// Load configuration by merging TOML file with CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self, Error> {
        let file_config = cli
            .config
            .as_ref()
            .and_then(|p| file::load_from_path(p))
            .or_else(file::load_from_default_paths)
            .unwrap_or_default();

        Self::merge(cli, file_config)
    }

    fn merge(cli: &Cli, file_config: FileConfig) -> Result<Self, Error> {
        let variant = match cli.getinfo.as_deref() {
            Some(hex) => DeviceVariant::identify(&parse_hex_bytes(hex)?)?,
            None => cli.variant.unwrap_or(file_config.variant),
        };

        let tracker = TrackerConfig {
            weight_threshold: cli
                .weight_threshold
                .or(file_config.weight_threshold)
                .unwrap_or(DEFAULT_WEIGHT_THRESHOLD),
            position_change_threshold: cli
                .position_threshold
                .or(file_config.position_threshold)
                .unwrap_or(DEFAULT_POSITION_CHANGE_THRESHOLD),
            movement_bitshift: cli
                .bitshift
                .or(file_config.bitshift)
                .unwrap_or(DEFAULT_MOVEMENT_BITSHIFT),
            reverse: cli.reverse || file_config.reverse,
            send_events: !cli.no_send_events && file_config.send_events,
            log_packets: cli.log_packets || file_config.log_packets,
            log_events: cli.log_events || file_config.log_events,
        };

        Ok(Self {
            input: cli.input.clone().unwrap_or(file_config.input),
            variant,
            tracker,
        })
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.tracker.movement_bitshift >= 32 {
            return Err(Error::InvalidConfig(format!(
                "bitshift {} must be below 32",
                self.tracker.movement_bitshift
            )));
        }
        if self.tracker.position_change_threshold > MAX_POSITION {
            return Err(Error::InvalidConfig(format!(
                "position threshold {:#x} exceeds the {:#x} position range",
                self.tracker.position_change_threshold, MAX_POSITION
            )));
        }
        Ok(())
    }
}

/// Parse "04 43 00", "0x04,0x43" and similar into bytes.
fn parse_hex_bytes(s: &str) -> Result<Vec<u8>, Error> {
    s.split(|c: char| c.is_whitespace() || c == ',' || c == ':')
        .filter(|t| !t.is_empty())
        .map(|t| {
            let digits = t.trim_start_matches("0x").trim_start_matches("0X");
            u8::from_str_radix(digits, 16)
                .map_err(|_| Error::InvalidConfig(format!("invalid GETINFO byte '{}'", t)))
        })
        .collect()
}
