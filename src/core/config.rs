use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::system_monitor::{
    ColumnLayout, SortKey, TemperatureMode, DEFAULT_HISTORY_SIZE, DEFAULT_TEMP_THRESHOLD_CELSIUS,
};
use crate::error::{DashError, Result};

/// Where process rows come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessBackend {
    /// Structured rows from sysinfo
    #[default]
    Sysinfo,
    /// Fixed-column `ps` output
    Ps,
}

/// Dashboard configuration, stored as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub temperature_mode: TemperatureMode,
    /// Alert threshold in Celsius; converted once when Fahrenheit is selected
    pub temp_threshold_celsius: i32,
    /// Interfaces left out of the network totals
    pub excluded_interfaces: Vec<String>,
    pub network_interval_ms: u64,
    pub process_interval_ms: u64,
    pub sensor_interval_ms: u64,
    pub history_size: usize,
    pub process_backend: ProcessBackend,
    pub ps_layout: ColumnLayout,
    pub sort_key: SortKey,
    pub group_processes: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            temperature_mode: TemperatureMode::Celsius,
            temp_threshold_celsius: DEFAULT_TEMP_THRESHOLD_CELSIUS,
            excluded_interfaces: vec!["tun0".to_string()],
            network_interval_ms: 1000,
            process_interval_ms: 1000,
            sensor_interval_ms: 5000,
            history_size: DEFAULT_HISTORY_SIZE,
            process_backend: ProcessBackend::Sysinfo,
            ps_layout: ColumnLayout::default(),
            sort_key: SortKey::Cpu,
            group_processes: true,
        }
    }
}

impl DashboardConfig {
    /// Load from the default location, falling back to defaults.
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self::load_from(&path))
    }

    /// Load from `path`. A missing file gives the defaults; so does a corrupted
    /// one, with a warning.
    pub fn load_from(path: &Path) -> Self {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(_) => return Self::default(),
        };

        if data.trim().is_empty() {
            return Self::default();
        }

        match serde_json::from_str::<Self>(&data) {
            Ok(config) => match config.validate() {
                Ok(()) => config,
                Err(e) => {
                    log::warn!("Ignoring invalid config {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to parse config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.network_interval_ms == 0
            || self.process_interval_ms == 0
            || self.sensor_interval_ms == 0
        {
            return Err(DashError::config("sampling intervals must be non-zero"));
        }
        self.ps_layout.validate()
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("config.json"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("errors.log"))
    }

    fn app_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DashError::config("Could not determine config directory"))?;
        Ok(config_dir.join("sysdash"))
    }

    pub fn network_interval(&self) -> Duration {
        Duration::from_millis(self.network_interval_ms)
    }

    pub fn process_interval(&self) -> Duration {
        Duration::from_millis(self.process_interval_ms)
    }

    pub fn sensor_interval(&self) -> Duration {
        Duration::from_millis(self.sensor_interval_ms)
    }
}
