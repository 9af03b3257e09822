use crate::predictor::ClockStyle;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";
pub const DEFAULT_SERVER_PORT: u16 = 8080;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub app: AppSection,
    pub logging: LoggingSection,
    #[serde(default)]
    pub calibration: Option<CalibrationSettings>,
    #[serde(default)]
    pub server: Option<ServerSection>,
    #[serde(default)]
    pub display: Option<DisplaySection>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSection {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSection {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CalibrationSettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSection {
    /// Port to listen on (default: 8080)
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplaySection {
    /// `"24h"` (default) or `"12h"`
    pub clock: Option<ClockStyle>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn load_default() -> Result<Config, ConfigError> {
    load_from_path(DEFAULT_CONFIG_PATH)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

impl Config {
    pub fn calibration_path(&self) -> Option<&Path> {
        let path = self.calibration.as_ref()?.path.as_deref()?;
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    }

    /// Returns the server port (default: 8080)
    pub fn server_port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    pub fn clock_style(&self) -> ClockStyle {
        self.display
            .as_ref()
            .and_then(|d| d.clock)
            .unwrap_or_default()
    }

    /// Max log level, falling back to `INFO` for unknown names.
    pub fn log_level(&self) -> tracing::Level {
        self.logging
            .level
            .parse()
            .unwrap_or(tracing::Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn write_temp_config(name: &str, contents: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let unique = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
        let path = std::env::temp_dir().join(format!("better-rest-{name}-{unique}.toml"));
        fs::write(&path, contents)?;
        Ok(path)
    }

    #[test]
    fn default_config_includes_calibration_path() -> Result<(), Box<dyn std::error::Error>> {
        let config = load_default()?;
        assert!(config.calibration_path().is_some());
        Ok(())
    }

    #[test]
    fn empty_calibration_path_is_treated_as_missing() -> Result<(), Box<dyn std::error::Error>> {
        let path = write_temp_config(
            "empty-cal",
            r#"
[app]
name = "better-rest"

[logging]
level = "info"

[calibration]
path = ""
"#,
        )?;

        let result = load_from_path(&path)?;
        let _ = fs::remove_file(&path);

        assert!(result.calibration_path().is_none());
        Ok(())
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let path = write_temp_config(
            "minimal",
            r#"
[app]
name = "better-rest"

[logging]
level = "verbose"
"#,
        )?;

        let result = load_from_path(&path)?;
        let _ = fs::remove_file(&path);

        assert!(result.calibration_path().is_none());
        assert_eq!(result.server_port(), DEFAULT_SERVER_PORT);
        assert_eq!(result.clock_style(), ClockStyle::TwentyFourHour);
        assert_eq!(result.log_level(), tracing::Level::INFO);
        Ok(())
    }

    #[test]
    fn display_and_server_sections_are_applied() -> Result<(), Box<dyn std::error::Error>> {
        let path = write_temp_config(
            "display",
            r#"
[app]
name = "better-rest"

[logging]
level = "debug"

[server]
port = 9090

[display]
clock = "12h"
"#,
        )?;

        let result = load_from_path(&path)?;
        let _ = fs::remove_file(&path);

        assert_eq!(result.server_port(), 9090);
        assert_eq!(result.clock_style(), ClockStyle::TwelveHour);
        assert_eq!(result.log_level(), tracing::Level::DEBUG);
        Ok(())
    }

    #[test]
    fn unknown_clock_style_returns_parse_error() -> Result<(), Box<dyn std::error::Error>> {
        let path = write_temp_config(
            "bad-clock",
            r#"
[app]
name = "better-rest"

[logging]
level = "info"

[display]
clock = "sundial"
"#,
        )?;

        let result = load_from_path(&path);
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        Ok(())
    }

    #[test]
    fn missing_config_file_returns_read_error() -> Result<(), Box<dyn std::error::Error>> {
        let unique = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
        let path = std::env::temp_dir().join(format!("better-rest-missing-{unique}.toml"));

        let result = load_from_path(&path);

        assert!(matches!(result, Err(ConfigError::Read(_))));
        Ok(())
    }

    #[test]
    fn invalid_toml_returns_parse_error() -> Result<(), Box<dyn std::error::Error>> {
        let path = write_temp_config("invalid", "not = [valid")?;

        let result = load_from_path(&path);
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        Ok(())
    }
}
