//! Presentation settings
//!
//! Gameplay is fixed by `consts`; these only affect how frames are paced,
//! presented, and logged. Persisted as JSON in LocalStorage on the web, or
//! read from the file named by `ARKANOID_SETTINGS` natively.

use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;

/// Host/presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Wait for vertical blank when presenting
    pub vsync: bool,
    /// Longest frame delta (seconds) fed to the fixed-step accumulator
    pub max_frame_dt: f32,
    /// Log level for the browser console ("error" through "trace")
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vsync: true,
            max_frame_dt: 0.1,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Frame delta cap, falling back to the default when it is not finite or
    /// below one tick (either would stall or slow the simulation)
    pub fn max_frame_dt(&self) -> f32 {
        if self.max_frame_dt.is_finite() && self.max_frame_dt >= SIM_DT {
            self.max_frame_dt
        } else {
            let fallback = Self::default().max_frame_dt;
            log::warn!(
                "max_frame_dt {} must be at least {:.4}s, using {}",
                self.max_frame_dt,
                SIM_DT,
                fallback
            );
            fallback
        }
    }

    /// Configured log level, falling back to `Info` when unrecognized
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "arkanoid_settings";

    /// Environment variable naming a native settings file
    #[allow(dead_code)]
    const ENV_PATH: &'static str = "ARKANOID_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => return settings,
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Load settings from the file named by `ARKANOID_SETTINGS`, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings {}: {}", path, e);
                Self::default()
            }
        }
    }
}
