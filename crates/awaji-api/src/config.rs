//! Configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use awaji_progression::application::engine::EngineConfig;

use crate::error::AppError;

/// Server and game timing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Story text file; placeholders are shown when unset.
    pub story_path: Option<PathBuf>,
    /// Engine delays.
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Reads `HOST`, `PORT`, `STORY_PATH`, `ROLL_DELAY_MS` and
    /// `STEP_DELAY_MS`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable lookup.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a numeric variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = EngineConfig::default();
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_var(&lookup, "PORT", 3000_u16)?;
        let story_path = lookup("STORY_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let roll_ms = parse_var(&lookup, "ROLL_DELAY_MS", millis(defaults.roll_delay))?;
        let step_ms = parse_var(&lookup, "STEP_DELAY_MS", millis(defaults.step_delay))?;

        Ok(Self {
            host,
            port,
            story_path,
            engine: EngineConfig {
                roll_delay: Duration::from_millis(roll_ms),
                step_delay: Duration::from_millis(step_ms),
            },
        })
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be a valid number: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.story_path, None);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("STORY_PATH", "assets/story.txt"),
            ("ROLL_DELAY_MS", "50"),
            ("STEP_DELAY_MS", "10"),
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.story_path, Some(PathBuf::from("assets/story.txt")));
        assert_eq!(config.engine.roll_delay, Duration::from_millis(50));
        assert_eq!(config.engine.step_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_invalid_port_is_a_config_error() {
        match config_from(&[("PORT", "eighty")]) {
            Err(AppError::Config(msg)) => assert!(msg.starts_with("PORT must be")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_story_path_is_ignored() {
        let config = config_from(&[("STORY_PATH", "  ")]).unwrap();
        assert_eq!(config.story_path, None);
    }
}
