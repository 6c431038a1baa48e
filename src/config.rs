//! Platform configuration
//!
//! Timing constants, queue capacity and the site root. Defaults match the
//! values the site has always used; a JSON file and environment variables can
//! override them.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::PlatformError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Directory that site-root-absolute asset paths ("/src/a.js") resolve against.
    pub site_root: PathBuf,
    pub code_load_delay_ms: u64,
    pub toast_enter_delay_ms: u64,
    pub toast_lifetime_ms: u64,
    pub toast_exit_ms: u64,
    /// Maximum toasts on screen; the oldest is evicted past this.
    pub toast_capacity: usize,
    pub accordion_transition_ms: u64,
    pub modal_close_ms: u64,
    pub highlight_duration_ms: u64,
    pub section_wait_timeout_ms: u64,
    pub scroll_offset_px: f64,
    pub scroll_to_top_threshold_px: f64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            site_root: PathBuf::from("."),
            code_load_delay_ms: 100,
            toast_enter_delay_ms: 100,
            toast_lifetime_ms: 5000,
            toast_exit_ms: 300,
            toast_capacity: 5,
            accordion_transition_ms: 300,
            modal_close_ms: 200,
            highlight_duration_ms: 3000,
            section_wait_timeout_ms: 3000,
            scroll_offset_px: 80.0,
            scroll_to_top_threshold_px: 300.0,
        }
    }
}

impl PlatformConfig {
    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, PlatformError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PlatformError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| PlatformError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, PlatformError> {
        Self::default().with_env_overrides()
    }

    /// Apply `LEARNING_*` environment overrides on top of `self`.
    pub fn with_env_overrides(mut self) -> Result<Self, PlatformError> {
        if let Ok(root) = std::env::var("LEARNING_SITE_ROOT") {
            self.site_root = PathBuf::from(root);
        }
        self.code_load_delay_ms = env_or("LEARNING_CODE_LOAD_DELAY_MS", self.code_load_delay_ms);
        self.toast_lifetime_ms = env_or("LEARNING_TOAST_LIFETIME_MS", self.toast_lifetime_ms);
        self.toast_capacity = env_or("LEARNING_TOAST_CAPACITY", self.toast_capacity);
        self.section_wait_timeout_ms =
            env_or("LEARNING_SECTION_WAIT_TIMEOUT_MS", self.section_wait_timeout_ms);

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), PlatformError> {
        if self.toast_capacity == 0 {
            return Err(PlatformError::Config(
                "toast_capacity must be at least 1".to_string(),
            ));
        }
        if !self.scroll_offset_px.is_finite() || !self.scroll_to_top_threshold_px.is_finite() {
            return Err(PlatformError::Config(
                "scroll distances must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn code_load_delay(&self) -> Duration {
        Duration::from_millis(self.code_load_delay_ms)
    }

    pub fn toast_timings(&self) -> crate::widgets::toast::ToastTimings {
        crate::widgets::toast::ToastTimings {
            enter_delay: Duration::from_millis(self.toast_enter_delay_ms),
            lifetime: Duration::from_millis(self.toast_lifetime_ms),
            exit: Duration::from_millis(self.toast_exit_ms),
        }
    }

    pub fn accordion_transition(&self) -> Duration {
        Duration::from_millis(self.accordion_transition_ms)
    }

    pub fn modal_close(&self) -> Duration {
        Duration::from_millis(self.modal_close_ms)
    }

    pub fn highlight_duration(&self) -> Duration {
        Duration::from_millis(self.highlight_duration_ms)
    }

    pub fn section_wait_timeout(&self) -> Duration {
        Duration::from_millis(self.section_wait_timeout_ms)
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_site_constants() {
        let config = PlatformConfig::default();
        assert_eq!(config.code_load_delay(), Duration::from_millis(100));
        assert_eq!(config.toast_timings().lifetime, Duration::from_secs(5));
        assert_eq!(config.accordion_transition(), Duration::from_millis(300));
        assert_eq!(config.section_wait_timeout(), Duration::from_millis(3000));
        assert_eq!(config.scroll_offset_px, 80.0);
    }

    #[test]
    fn test_json_file_keeps_unset_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"toast_capacity": 2, "site_root": "/srv/site"}}"#).unwrap();

        let config = PlatformConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.toast_capacity, 2);
        assert_eq!(config.site_root, PathBuf::from("/srv/site"));
        assert_eq!(config.toast_lifetime_ms, 5000);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"toast_capacity": 0}}"#).unwrap();

        let err = PlatformConfig::from_json_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("toast_capacity"));
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        assert_eq!(env_or("LEARNING_TEST_UNSET_VARIABLE", 42u64), 42);
    }
}
