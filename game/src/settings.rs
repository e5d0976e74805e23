use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::render::BLOCK_SIZE;
use crate::session::DEFAULT_DROP_INTERVAL;

pub const SETTINGS_PATH_ENV: &str = "BLOCKFALL_SETTINGS_PATH";

pub const MIN_DROP_INTERVAL: Duration = Duration::from_millis(1);
pub const MIN_CELL_SIZE: u32 = 8;
pub const MAX_CELL_SIZE: u32 = 96;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(with = "crate::serde_duration", default = "default_drop_interval")]
    pub drop_interval: Duration,
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
    /// Fixed seed for piece selection; `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
    /// PNGs registered at startup, in order.
    #[serde(default)]
    pub images: Vec<PathBuf>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            drop_interval: default_drop_interval(),
            cell_size: default_cell_size(),
            seed: None,
            images: Vec::new(),
        }
    }
}

impl GameSettings {
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        self.drop_interval = self.drop_interval.max(MIN_DROP_INTERVAL);
        self.cell_size = self.cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE);
        self
    }
}

fn default_version() -> u32 {
    1
}

fn default_drop_interval() -> Duration {
    DEFAULT_DROP_INTERVAL
}

fn default_cell_size() -> u32 {
    BLOCK_SIZE
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn from_env() -> Self {
        Self::at(resolve_path(
            std::env::var_os(SETTINGS_PATH_ENV),
            std::env::var_os("XDG_CONFIG_HOME"),
            std::env::var_os("HOME"),
        ))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the settings file. A missing or unreadable file yields defaults.
    pub fn load(&self) -> GameSettings {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!("no settings at {} ({err}), using defaults", self.path.display());
                return GameSettings::default();
            }
        };
        match serde_json::from_slice::<GameSettings>(&bytes) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                warn!("ignoring malformed settings {}: {err}", self.path.display());
                GameSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &GameSettings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}

/// Explicit path, else `$XDG_CONFIG_HOME/blockfall/settings.json`, else
/// `$HOME/.config/blockfall/settings.json`, else the working directory.
pub fn resolve_path(
    explicit: Option<OsString>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> PathBuf {
    if let Some(explicit) = explicit {
        return PathBuf::from(explicit);
    }

    let base = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home.map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join("blockfall").join("settings.json")
}
