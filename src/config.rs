use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use visitlog::view::{
    check_pattern, detect_locale, parse_locale, DEFAULT_DATETIME_FORMAT, DEFAULT_TIME_FORMAT,
};
use visitlog::TimeFormat;

/// A validation error in the configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Keep only this many history entries (absent = unbounded)
    #[serde(default)]
    pub history_limit: Option<usize>,
    /// Refuse check-ins beyond this many active users (absent = no limit)
    #[serde(default)]
    pub max_active: Option<usize>,
    /// `strftime` pattern for history rows; `%x %X` follows the locale
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
    #[serde(default = "default_time_format")]
    pub time_format: String,
    /// Locale name such as `de_DE`; absent = taken from the environment
    #[serde(default)]
    pub locale: Option<String>,
}

fn default_datetime_format() -> String {
    DEFAULT_DATETIME_FORMAT.to_string()
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: None,
            max_active: None,
            datetime_format: default_datetime_format(),
            time_format: default_time_format(),
            locale: None,
        }
    }
}

impl Config {
    /// `<config_dir>/visitlog/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("visitlog").join("config.toml"))
    }

    /// Load the user-level config, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Validate the configuration, returning all errors found
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.history_limit == Some(0) {
            errors.push(ValidationError {
                field: "history_limit".to_string(),
                message: "Must be at least 1; remove it for unbounded history".to_string(),
            });
        }

        if self.max_active == Some(0) {
            errors.push(ValidationError {
                field: "max_active".to_string(),
                message: "Must be at least 1; remove it for no limit".to_string(),
            });
        }

        for (field, pattern) in [
            ("datetime_format", &self.datetime_format),
            ("time_format", &self.time_format),
        ] {
            if let Err(e) = check_pattern(pattern) {
                errors.push(ValidationError {
                    field: field.to_string(),
                    message: e.to_string(),
                });
            }
        }

        if let Some(Err(e)) = self.locale.as_deref().map(parse_locale) {
            errors.push(ValidationError {
                field: "locale".to_string(),
                message: e.to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Patterns and locale for rendering; call after [`validate`](Self::validate)
    pub fn time_format(&self) -> TimeFormat {
        let locale = self
            .locale
            .as_deref()
            .and_then(|name| parse_locale(name).ok())
            .unwrap_or_else(detect_locale);
        TimeFormat {
            datetime: self.datetime_format.clone(),
            time: self.time_format.clone(),
            locale,
        }
    }
}
