use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::device::DeviceVariant;

pub const DEFAULT_INPUT: &str = "/dev/serio_raw0";
const CONFIG_FILE_NAME: &str = "fjs-scroll.toml";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default = "default_input")]
    pub input: String,
    #[serde(default)]
    pub variant: DeviceVariant,
    pub weight_threshold: Option<u8>,
    pub position_threshold: Option<u16>,
    pub bitshift: Option<u32>,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default = "default_true")]
    pub send_events: bool,
    #[serde(default)]
    pub log_packets: bool,
    #[serde(default)]
    pub log_events: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT.into(),
            variant: DeviceVariant::default(),
            weight_threshold: None,
            position_threshold: None,
            bitshift: None,
            reverse: false,
            send_events: true,
            log_packets: false,
            log_events: false,
        }
    }
}

fn default_input() -> String {
    DEFAULT_INPUT.into()
}

fn default_true() -> bool {
    true
}

/// Read and parse one file. Missing or unparsable files yield `None`.
pub fn load_from_path(path: &Path) -> Option<FileConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content)
        .inspect(|_| log::debug!("Loaded config from {}", path.display()))
        .inspect_err(|e| log::warn!("Failed to parse {}: {}", path.display(), e))
        .ok()
}

/// First usable file of `./fjs-scroll.toml`, `~/.config/fjs-scroll.toml`.
pub fn load_from_default_paths() -> Option<FileConfig> {
    default_config_paths()
        .into_iter()
        .filter(|path| path.exists())
        .find_map(|path| load_from_path(&path))
}

fn default_config_paths() -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    std::iter::once(PathBuf::from(CONFIG_FILE_NAME))
        .chain(home.map(|h| h.join(".config").join(CONFIG_FILE_NAME)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.input, DEFAULT_INPUT);
        assert_eq!(config.variant, DeviceVariant::Wheel);
        assert!(config.send_events);
        assert!(config.bitshift.is_none());
    }

    #[test]
    fn test_parse_full_file() {
        let config: FileConfig = toml::from_str(
            r#"
            input = "/dev/serio_raw1"
            variant = "sensor"
            weight_threshold = 12
            position_threshold = 128
            bitshift = 5
            reverse = true
            send_events = false
            "#,
        )
        .unwrap();
        assert_eq!(config.input, "/dev/serio_raw1");
        assert_eq!(config.variant, DeviceVariant::Sensor);
        assert_eq!(config.weight_threshold, Some(12));
        assert_eq!(config.position_threshold, Some(128));
        assert_eq!(config.bitshift, Some(5));
        assert!(config.reverse);
        assert!(!config.send_events);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(toml::from_str::<FileConfig>("grab_input = true").is_err());
    }
}
