use std::path::PathBuf;
use std::time::Duration;

/// Default backend address (local development server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Application configuration DTO.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub polling: PollingConfig,
    pub export: ExportConfig,
    /// Profile directory override. Empty means "use the platform default".
    pub profile_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub base_url: String,
    /// Transport timeout for a single request. Zero disables it.
    pub request_timeout_secs: u64,
}

/// Admin watch timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingConfig {
    pub initial_delay_secs: u64,
    pub interval_secs: u64,
    pub list_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Where downloaded exports are written. Empty means the working directory.
    pub output_dir: PathBuf,
}

impl PollingConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_secs)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                request_timeout_secs: 30,
            },
            polling: PollingConfig {
                initial_delay_secs: 5,
                interval_secs: 15,
                list_limit: crate::ticket::DEFAULT_LIST_LIMIT,
            },
            export: ExportConfig {
                output_dir: PathBuf::new(),
            },
            profile_dir: PathBuf::new(),
        }
    }
}

impl AppConfig {
    /// Create AppConfig from a TOML value.
    ///
    /// Missing sections or keys keep the [`Default`] value; keys present with
    /// the wrong type are reported as errors rather than silently ignored.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let server = toml_value.get("server");
        let polling = toml_value.get("polling");
        let export = toml_value.get("export");
        let profile = toml_value.get("profile");

        Ok(Self {
            server: ServerConfig {
                base_url: read_str(server, "base_url")?
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.server.base_url),
                request_timeout_secs: read_u64(server, "request_timeout_secs")?
                    .unwrap_or(defaults.server.request_timeout_secs),
            },
            polling: PollingConfig {
                initial_delay_secs: read_u64(polling, "initial_delay_secs")?
                    .unwrap_or(defaults.polling.initial_delay_secs),
                interval_secs: read_u64(polling, "interval_secs")?
                    .unwrap_or(defaults.polling.interval_secs),
                list_limit: read_u32(polling, "list_limit")?
                    .unwrap_or(defaults.polling.list_limit),
            },
            export: ExportConfig {
                output_dir: read_str(export, "output_dir")?
                    .map(PathBuf::from)
                    .unwrap_or(defaults.export.output_dir),
            },
            profile_dir: read_str(profile, "dir")?
                .map(PathBuf::from)
                .unwrap_or(defaults.profile_dir),
        })
    }
}

fn read_str(section: Option<&toml::Value>, key: &str) -> anyhow::Result<Option<String>> {
    match section.and_then(|s| s.get(key)) {
        None => Ok(None),
        Some(toml::Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(anyhow::anyhow!(
            "config key `{key}` must be a string, got {}",
            other.type_str()
        )),
    }
}

fn read_u64(section: Option<&toml::Value>, key: &str) -> anyhow::Result<Option<u64>> {
    match section.and_then(|s| s.get(key)) {
        None => Ok(None),
        Some(toml::Value::Integer(i)) if *i >= 0 => Ok(Some(*i as u64)),
        Some(other) => Err(anyhow::anyhow!(
            "config key `{key}` must be a non-negative integer, got {other}"
        )),
    }
}

fn read_u32(section: Option<&toml::Value>, key: &str) -> anyhow::Result<Option<u32>> {
    read_u64(section, key)?
        .map(|v| {
            u32::try_from(v)
                .map_err(|_| anyhow::anyhow!("config key `{key}` is out of range, got {v}"))
        })
        .transpose()
}
