use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::env;

pub const DEFAULT_LISTING_URL: &str =
    "https://cafe.naver.com/ArticleList.nhn?search.clubid=29811364&search.boardtype=L";

/// Launcher settings persisted as `launcher.json`. Every field falls back to
/// its default when absent. Nav links left unset are not shown, except the
/// cafe link which falls back to the crawled listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    pub listing_url: String,
    pub discord_url: Option<String>,
    pub cafe_url: Option<String>,
    pub game_executable: Option<PathBuf>,
    pub game_args: Vec<String>,
    pub language: Option<String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_owned(),
            discord_url: None,
            cafe_url: None,
            game_executable: None,
            game_args: Vec::new(),
            language: None,
        }
    }
}

impl LauncherConfig {
    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| format!("invalid launcher config: {e}"))
    }

    /// Where the cafe nav link points: the configured URL, else the listing
    /// that is being crawled.
    pub fn cafe_link(&self) -> &str {
        self.cafe_url.as_deref().unwrap_or(&self.listing_url)
    }

    pub fn discord_link(&self) -> Option<&str> {
        self.discord_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

#[derive(Clone)]
pub struct StorageManager {
    config_path: PathBuf,
}

impl StorageManager {
    pub fn new() -> Self {
        // Best-effort directory creation; failures are surfaced on write.
        let _ = env::ensure_base_dirs();
        Self {
            config_path: env::config_path(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the saved config. A missing file yields defaults; an unreadable
    /// or malformed one is logged and also yields defaults.
    pub fn read_config(&self) -> LauncherConfig {
        let raw = match fs::read_to_string(&self.config_path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!(
                    "storage: no config at {} ({err}); using defaults",
                    self.config_path.display()
                );
                return LauncherConfig::default();
            }
        };
        LauncherConfig::from_json(&raw).unwrap_or_else(|err| {
            warn!("storage: {}: {err}", self.config_path.display());
            LauncherConfig::default()
        })
    }

    pub fn write_config(&self, config: &LauncherConfig) -> Result<(), String> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("unable to create config dir: {e}"))?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| format!("unable to serialize config: {e}"))?;
        fs::write(&self.config_path, json).map_err(|e| format!("unable to persist config: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_missing_fields_with_defaults() {
        let config = LauncherConfig::from_json(r#"{ "game_args": ["--fullscreen"] }"#)
            .expect("valid config");
        assert_eq!(config.listing_url, DEFAULT_LISTING_URL);
        assert_eq!(config.discord_url, None);
        assert_eq!(config.game_args, vec!["--fullscreen"]);
        assert_eq!(config.game_executable, None);
    }

    #[test]
    fn reads_every_field() {
        let config = LauncherConfig::from_json(
            r#"{
                "listing_url": "https://x/list?clubid=1",
                "discord_url": "https://discord.gg/abc",
                "cafe_url": "https://x/cafe",
                "game_executable": "/opt/game/run",
                "game_args": [],
                "language": "ko"
            }"#,
        )
        .expect("valid config");
        assert_eq!(config.listing_url, "https://x/list?clubid=1");
        assert_eq!(config.cafe_link(), "https://x/cafe");
        assert_eq!(config.discord_link(), Some("https://discord.gg/abc"));
        assert_eq!(config.game_executable, Some(PathBuf::from("/opt/game/run")));
        assert_eq!(config.language.as_deref(), Some("ko"));
    }

    #[test]
    fn unset_nav_links_fall_back() {
        let config = LauncherConfig::from_json(r#"{ "listing_url": "https://x/list?clubid=1" }"#)
            .expect("valid config");
        assert_eq!(config.cafe_link(), "https://x/list?clubid=1");
        assert_eq!(config.discord_link(), None);

        let blank = LauncherConfig::from_json(r#"{ "discord_url": "  " }"#).expect("valid config");
        assert_eq!(blank.discord_link(), None);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(LauncherConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let storage = StorageManager {
            config_path: PathBuf::from("/nonexistent/cafe-launcher/launcher.json"),
        };
        assert_eq!(storage.read_config(), LauncherConfig::default());
    }
}
