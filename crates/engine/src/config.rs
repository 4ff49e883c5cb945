use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::{DEFAULT_FRAME_MS, DEFAULT_KEY_RELEASE_MS};

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Piece sequence seed
    pub seed: u32,
    /// Frame period in milliseconds
    pub frame_ms: u32,
    /// Treat a held key as released after this long without repeats
    pub key_release_ms: u32,
    pub mute: bool,
    /// Log file; no logger is installed without one
    pub log_path: Option<String>,
    /// `env_logger` filter directives
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            frame_ms: DEFAULT_FRAME_MS,
            key_release_ms: DEFAULT_KEY_RELEASE_MS,
            mute: false,
            log_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Missing or unparsable values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let number = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u32>().ok());
        let text = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let seed = number("LCD_TETRIS_SEED").unwrap_or_else(clock_seed);
        let frame_ms = number("LCD_TETRIS_FRAME_MS")
            .filter(|&ms| ms > 0)
            .unwrap_or(DEFAULT_FRAME_MS);
        let key_release_ms =
            number("LCD_TETRIS_KEY_RELEASE_MS").unwrap_or(DEFAULT_KEY_RELEASE_MS);
        let mute = text("LCD_TETRIS_MUTE")
            .map(|s| s == "1" || s.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let log_path = text("LCD_TETRIS_LOG_PATH");
        let log_filter = text("LCD_TETRIS_LOG").unwrap_or_else(|| "info".to_string());

        Self {
            seed,
            frame_ms,
            key_release_ms,
            mute,
            log_path,
            log_filter,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_ms as u64)
    }

    pub fn key_release_timeout(&self) -> Duration {
        Duration::from_millis(self.key_release_ms as u64)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
