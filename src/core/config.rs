use crate::core::error::{HookwireError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 7337;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct HookwireConfig {
    #[serde(default)]
    pub listener: ListenerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListenerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ListenerConfig {
    fn default() -> Self {
        ListenerConfig {
            port: default_port(),
        }
    }
}

impl HookwireConfig {
    /// Port the hook commands should target. An explicit value (flag or
    /// `HOOKWIRE_PORT`, both resolved by clap) beats the config file.
    pub fn resolve_port(&self, explicit: Option<u16>) -> u16 {
        explicit.unwrap_or(self.listener.port)
    }
}

fn find_config_file() -> Option<PathBuf> {
    // Check working directory first
    let local_config = Path::new(".hookwirerc");
    if local_config.exists() {
        return Some(local_config.to_path_buf());
    }

    // Fall back to home directory
    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".hookwirerc");
        if home_config.exists() {
            return Some(home_config);
        }
    }

    None
}

pub fn parse_config(content: &str) -> Result<HookwireConfig> {
    let config: HookwireConfig =
        toml::from_str(content).map_err(|e| HookwireError::Config(e.to_string()))?;
    if config.listener.port == 0 {
        return Err(HookwireError::Config(
            "listener.port must be between 1 and 65535".to_string(),
        ));
    }
    Ok(config)
}

pub fn load_config() -> HookwireConfig {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => HookwireConfig::default(),
    }
}

/// Read a config file, falling back to defaults (with a warning) when it
/// cannot be read or parsed.
pub fn load_config_from(path: &Path) -> HookwireConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse {}: {}", path.display(), e);
            HookwireConfig::default()
        }),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            HookwireConfig::default()
        }
    }
}
