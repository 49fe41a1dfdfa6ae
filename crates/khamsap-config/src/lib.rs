use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::data::DataConfig;
use self::speech::SpeechConfig;

pub mod data;
pub mod speech;

pub use speech::Pacing;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub speech: SpeechConfig,

    /// `tracing` filter directive used when RUST_LOG is unset
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Config {
    pub fn new() -> Self {
        let log_level = env::var("KHAMSAP_LOG").unwrap_or_else(|_| default_log_level());

        Config {
            data: DataConfig::new(),
            speech: SpeechConfig::new(),

            log_level,
            log_json: false,
        }
    }

    /// Load a JSON config file. A missing file yields [`Config::new`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::new());
        }

        let raw = fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"speech": {"pause_ms": 300}, "log_json": true}"#).unwrap();
        assert_eq!(config.speech.pause_ms, 300);
        assert_eq!(config.speech.rate, 0.92);
        assert_eq!(config.speech.pacing, Pacing::Dispatch);
        assert!(config.log_json);
    }

    #[test]
    fn env_overrides_survive_partial_sections() {
        // SAFETY: no other test in this crate asserts on these variables
        unsafe {
            env::set_var("KHAMSAP_TTS_PROGRAM", "espeak-test");
            env::set_var("KHAMSAP_DATA", "https://example.org/words.json");
        }

        let config: Config = serde_json::from_str(
            r#"{"speech": {"pause_ms": 300}, "data": {}}"#,
        )
        .unwrap();

        unsafe {
            env::remove_var("KHAMSAP_TTS_PROGRAM");
            env::remove_var("KHAMSAP_DATA");
        }

        assert_eq!(config.speech.program, "espeak-test");
        assert_eq!(config.speech.pause_ms, 300);
        assert_eq!(config.data.source, "https://example.org/words.json");
    }

    #[test]
    fn pacing_parses_lowercase() {
        let config: Config =
            serde_json::from_str(r#"{"speech": {"pacing": "completion"}}"#).unwrap();
        assert_eq!(config.speech.pacing, Pacing::Completion);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Path::new("does/not/exist.json")).unwrap();
        assert_eq!(config.speech.base_wpm, 175);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = env::temp_dir().join(format!("khamsap-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        fs::remove_dir_all(&dir).ok();
    }
}
