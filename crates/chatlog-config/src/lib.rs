use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for chatlog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub archive: ArchiveConfig,

    #[serde(default)]
    pub sanitize: SanitizeConfig,

    #[serde(default)]
    pub channels: ChannelsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Pause before each chat page request
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout; unset means wait indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizeConfig {
    #[serde(default = "default_sanitize_source")]
    pub source: PathBuf,

    #[serde(default = "default_sanitize_dest")]
    pub dest: PathBuf,

    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelsConfig {
    #[serde(default = "default_database")]
    pub database: PathBuf,

    #[serde(default = "default_channels_json")]
    pub json: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            request_delay_ms: default_request_delay_ms(),
            timeout_secs: None,
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            source: default_sanitize_source(),
            dest: default_sanitize_dest(),
            placeholder: default_placeholder(),
        }
    }
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            json: default_channels_json(),
        }
    }
}

impl ApiConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_base_url() -> String {
    "https://api.chzzk.naver.com/service/v1".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/"
        .to_string()
}

fn default_request_delay_ms() -> u64 {
    500
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_sanitize_source() -> PathBuf {
    PathBuf::from("chat_logs")
}

fn default_sanitize_dest() -> PathBuf {
    PathBuf::from("chat_logs_deploy")
}

fn default_placeholder() -> String {
    "<>".to_string()
}

fn default_database() -> PathBuf {
    PathBuf::from("server/sqlite.db")
}

fn default_channels_json() -> PathBuf {
    PathBuf::from("channels.json")
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "chatlog", "chatlog") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.chatlog/config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.request_delay(), Duration::from_millis(500));
        assert_eq!(config.api.timeout(), None);
        assert_eq!(config.sanitize.source, PathBuf::from("chat_logs"));
        assert_eq!(config.sanitize.dest, PathBuf::from("chat_logs_deploy"));
        assert_eq!(config.sanitize.placeholder, "<>");
        assert!(config.api.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.api.base_url, config.api.base_url);
        assert_eq!(parsed.archive.output_dir, config.archive.output_dir);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[api]
request_delay_ms = 1000
timeout_secs = 30

[sanitize]
dest = "public_logs"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.request_delay(), Duration::from_secs(1));
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.api.base_url, default_base_url());
        assert_eq!(config.sanitize.source, PathBuf::from("chat_logs"));
        assert_eq!(config.sanitize.dest, PathBuf::from("public_logs"));
        assert_eq!(config.channels.json, PathBuf::from("channels.json"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[archive]\noutput_dir = \"logs\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.archive.output_dir, PathBuf::from("logs"));
        assert!(Config::load_from(&dir.path().join("missing.toml")).is_err());
    }
}
