// ABOUTME: Configuration management for trendify
// Flow variant flags, simulated timings, media locations and UI preferences

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

use crate::wizard::FlowFlags;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    #[serde(default = "default_version")]
    pub version: String,

    /// Which flavour of the wizard to run
    #[serde(default)]
    pub flow: FlowConfig,

    /// Delays and increments of the simulated work
    #[serde(default)]
    pub timing: TimingConfig,

    /// Asset and transcoder locations
    #[serde(default)]
    pub media: MediaConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiPreferences,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Only allow the brand paired with the selected trend
    #[serde(default = "default_true")]
    pub strict_brand_gating: bool,

    /// Enable the analytics screen
    #[serde(default = "default_true")]
    pub analytics_enabled: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            strict_brand_gating: true,
            analytics_enabled: true,
        }
    }
}

impl FlowConfig {
    pub fn flags(&self) -> FlowFlags {
        FlowFlags {
            strict_brand_gating: self.strict_brand_gating,
            analytics_enabled: self.analytics_enabled,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Fake generation tick
    #[serde(default = "default_progress_interval")]
    pub progress_interval_ms: u64,

    /// Upper bound of the random progress step per tick
    #[serde(default = "default_progress_increment")]
    pub progress_max_increment: f64,

    /// Pause between reaching 100% and moving on
    #[serde(default = "default_progress_done_delay")]
    pub progress_done_delay_ms: u64,

    #[serde(default = "default_upload_base_delay")]
    pub upload_base_delay_ms: u64,

    /// Extra delay per additional target when publishing
    #[serde(default = "default_upload_stagger")]
    pub upload_stagger_ms: u64,

    /// Random jitter added to every upload
    #[serde(default = "default_upload_jitter")]
    pub upload_jitter_ms: u64,

    /// Pause before the publish "all done" notification
    #[serde(default = "default_all_done_delay")]
    pub all_done_delay_ms: u64,

    /// Allowed audio/video divergence in seconds
    #[serde(default = "default_drift_tolerance")]
    pub drift_tolerance_secs: f64,

    /// TUI redraw/tick interval
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            progress_interval_ms: default_progress_interval(),
            progress_max_increment: default_progress_increment(),
            progress_done_delay_ms: default_progress_done_delay(),
            upload_base_delay_ms: default_upload_base_delay(),
            upload_stagger_ms: default_upload_stagger(),
            upload_jitter_ms: default_upload_jitter(),
            all_done_delay_ms: default_all_done_delay(),
            drift_tolerance_secs: default_drift_tolerance(),
            tick_rate_ms: default_tick_rate(),
        }
    }
}

impl TimingConfig {
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    pub fn progress_done_delay(&self) -> Duration {
        Duration::from_millis(self.progress_done_delay_ms)
    }

    pub fn all_done_delay(&self) -> Duration {
        Duration::from_millis(self.all_done_delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Directory the catalog's asset paths are resolved against
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    /// ffmpeg binary; looked up on PATH when unset
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Where "Download merged video" writes files
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
            ffmpeg_path: None,
            export_dir: default_export_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Color theme
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Show the footer line
    #[serde(default = "default_true")]
    pub show_footer: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            show_footer: true,
        }
    }
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_true() -> bool {
    true
}

fn default_progress_interval() -> u64 {
    350
}

fn default_progress_increment() -> f64 {
    20.0
}

fn default_progress_done_delay() -> u64 {
    500
}

fn default_upload_base_delay() -> u64 {
    900
}

fn default_upload_stagger() -> u64 {
    600
}

fn default_upload_jitter() -> u64 {
    900
}

fn default_all_done_delay() -> u64 {
    600
}

fn default_drift_tolerance() -> f64 {
    0.3
}

fn default_tick_rate() -> u64 {
    100
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_theme() -> String {
    "dark".to_string()
}

impl AppConfig {
    /// Load configuration from default locations, then apply env overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Lowest precedence first so later files win
        for path in Self::get_config_paths().into_iter().rev() {
            if path.exists() {
                debug!("Loading config from {}", path.display());
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config from {}", path.display()))?;
                config.merge_toml(&content)
                    .with_context(|| format!("Failed to parse config from {}", path.display()))?;
            }
        }

        config.apply_env(std::env::vars());
        Ok(config)
    }

    /// Save configuration to user config directory
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::get_user_config_dir()?;
        fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join("config.toml");
        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get configuration file paths in order of precedence
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        // 1. Local project config
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(".trendify").join("config.toml"));
        }

        // 2. User config (~/.trendify/config/config.toml)
        if let Ok(config_dir) = Self::get_user_config_dir() {
            paths.push(config_dir.join("config.toml"));
        }

        // 3. System config
        paths.push(PathBuf::from("/etc/trendify/config.toml"));

        paths
    }

    /// Get user configuration directory
    fn get_user_config_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home_dir.join(".trendify").join("config"))
    }

    /// Overlay a TOML document. Only keys present in the document change.
    pub fn merge_toml(&mut self, content: &str) -> Result<()> {
        let overlay: toml::Table = toml::from_str(content)?;
        let toml::Value::Table(mut base) = toml::Value::try_from(&*self)? else {
            anyhow::bail!("Config did not serialize to a table");
        };
        merge_tables(&mut base, overlay);
        *self = toml::Value::Table(base).try_into()?;
        Ok(())
    }

    /// Apply `TRENDIFY_*` overrides
    pub fn apply_env<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                "TRENDIFY_ASSETS_DIR" => self.media.assets_dir = PathBuf::from(value),
                "TRENDIFY_EXPORT_DIR" => self.media.export_dir = PathBuf::from(value),
                "TRENDIFY_FFMPEG" => self.media.ffmpeg_path = Some(PathBuf::from(value)),
                "TRENDIFY_STRICT_BRANDS" => match parse_bool(&value) {
                    Some(v) => self.flow.strict_brand_gating = v,
                    None => warn!("Ignoring {}={}", key, value),
                },
                "TRENDIFY_ANALYTICS" => match parse_bool(&value) {
                    Some(v) => self.flow.analytics_enabled = v,
                    None => warn!("Ignoring {}={}", key, value),
                },
                _ => {}
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            flow: FlowConfig::default(),
            timing: TimingConfig::default(),
            media: MediaConfig::default(),
            ui: UiPreferences::default(),
        }
    }
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert!(config.flow.strict_brand_gating);
        assert!(config.flow.analytics_enabled);
        assert_eq!(config.timing.progress_interval_ms, 350);
        assert!((config.timing.drift_tolerance_secs - 0.3).abs() < f64::EPSILON);
        assert!(config.media.ffmpeg_path.is_none());
    }

    #[test]
    fn test_merge_keeps_unspecified_keys() {
        let mut config = AppConfig::default();
        config
            .merge_toml(
                r#"
                [flow]
                strict_brand_gating = false

                [timing]
                upload_jitter_ms = 0
                "#,
            )
            .unwrap();

        assert!(!config.flow.strict_brand_gating);
        assert!(config.flow.analytics_enabled);
        assert_eq!(config.timing.upload_jitter_ms, 0);
        assert_eq!(config.timing.upload_base_delay_ms, 900);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut config = AppConfig::default();
        assert!(config.merge_toml("[flow\nbroken").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env(vec![
            ("TRENDIFY_ASSETS_DIR".to_string(), "/srv/assets".to_string()),
            ("TRENDIFY_ANALYTICS".to_string(), "off".to_string()),
            ("TRENDIFY_STRICT_BRANDS".to_string(), "maybe".to_string()),
            ("HOME".to_string(), "/root".to_string()),
        ]);

        assert_eq!(config.media.assets_dir, PathBuf::from("/srv/assets"));
        assert!(!config.flow.analytics_enabled);
        assert!(config.flow.strict_brand_gating);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let mut loaded = AppConfig::default();
        loaded.merge_toml(&text).unwrap();
        assert_eq!(loaded.timing.all_done_delay_ms, config.timing.all_done_delay_ms);
    }
}
