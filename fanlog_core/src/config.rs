//! Configuration surface for the logger.
//!
//! Options can be built in code or loaded from
//! `$XDG_CONFIG_HOME/fanlog/config.toml`:
//!
//! ```toml
//! level = 30
//! console = true
//! files = ["logs/app.log"]
//! rotate = 1048576
//! ```

use crate::{Error, Result, Severity};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A loosely typed option value
///
/// `level` and `rotate` accept anything "numeric-like": integers, floats or
/// strings that parse as a number. Values that are not numeric are ignored
/// rather than rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Setting {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Setting {
    /// Numeric value, if this setting is numeric-like
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Setting::Bool(_) => return None,
            Setting::Integer(i) => *i as f64,
            Setting::Float(f) => *f,
            Setting::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        (!n.is_nan()).then_some(n)
    }

    /// Boolean value; only a real boolean counts
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Setting::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for Setting {
    fn from(value: bool) -> Self {
        Setting::Bool(value)
    }
}

impl From<i64> for Setting {
    fn from(value: i64) -> Self {
        Setting::Integer(value)
    }
}

impl From<u64> for Setting {
    fn from(value: u64) -> Self {
        Setting::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<i32> for Setting {
    fn from(value: i32) -> Self {
        Setting::Integer(i64::from(value))
    }
}

impl From<f64> for Setting {
    fn from(value: f64) -> Self {
        Setting::Float(value)
    }
}

impl From<&str> for Setting {
    fn from(value: &str) -> Self {
        Setting::Text(value.to_string())
    }
}

impl From<String> for Setting {
    fn from(value: String) -> Self {
        Setting::Text(value)
    }
}

impl From<Severity> for Setting {
    fn from(value: Severity) -> Self {
        Setting::Integer(i64::from(value.rank()))
    }
}

/// Options accepted by [`crate::Registry::configure`]
///
/// Every field is optional; absent fields leave the registry untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LogOptions {
    /// Threshold, clamped onto the severity ranks
    #[serde(default)]
    pub level: Option<Setting>,

    /// Console output on/off; non-boolean values are ignored
    #[serde(default)]
    pub console: Option<Setting>,

    /// Files to open for append; additive across calls
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// Rotation threshold in bytes, 0 disables rotation
    #[serde(default)]
    pub rotate: Option<Setting>,
}

impl LogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: impl Into<Setting>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_console(mut self, enabled: bool) -> Self {
        self.console = Some(Setting::Bool(enabled));
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    pub fn with_rotate(mut self, bytes: impl Into<Setting>) -> Self {
        self.rotate = Some(bytes.into());
        self
    }

    /// Load options from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load options from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let options: LogOptions = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(options)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = match dirs::config_dir() {
            Some(dir) => dir,
            None => {
                let home = std::env::var("HOME").map_err(|_| {
                    Error::Config("no config directory and HOME is not set".into())
                })?;
                PathBuf::from(home).join(".config")
            }
        };
        Ok(base.join("fanlog").join("config.toml"))
    }
}
