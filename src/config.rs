use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Absolute path prefix of the endpoints; replaces any path on `base_url`.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Honour HTTP(S)_PROXY / NO_PROXY from the environment.
    #[serde(default = "default_system_proxy")]
    pub system_proxy: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            timeout_secs: default_timeout_secs(),
            system_proxy: default_system_proxy(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".into()
}

fn default_api_prefix() -> String {
    "/api/v1".into()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_system_proxy() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Initial state of the chart toggle.
    #[serde(default = "default_chart_requested")]
    pub chart_requested: bool,
    /// Drop `state` responses that were superseded by a newer request instead of
    /// letting the last response win.
    #[serde(default)]
    pub sequence_guard: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            chart_requested: default_chart_requested(),
            sequence_guard: false,
        }
    }
}

fn default_chart_requested() -> bool {
    true
}

impl AppConfig {
    /// Reads `CONFIG_FILE` (default `config.toml`); a missing default file yields defaults.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => {
                let s = std::fs::read_to_string(&path)
                    .map_err(|e| anyhow::anyhow!("reading {}: {}", path, e))?;
                Self::load_from_str(&s)
            }
            Err(_) => match std::fs::read_to_string("config.toml") {
                Ok(s) => Self::load_from_str(&s),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    let config = Self::default();
                    config.validate()?;
                    Ok(config)
                }
                Err(e) => Err(e.into()),
            },
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let url = url::Url::parse(&self.server.base_url).map_err(|e| {
            anyhow::anyhow!(
                "server.base_url must be an absolute URL, got {:?}: {}",
                self.server.base_url,
                e
            )
        })?;
        anyhow::ensure!(
            matches!(url.scheme(), "http" | "https"),
            "server.base_url must use http or https, got {}",
            url.scheme()
        );
        anyhow::ensure!(
            self.server.api_prefix.starts_with('/'),
            "server.api_prefix must start with '/', got {:?}",
            self.server.api_prefix
        );
        anyhow::ensure!(
            self.server.timeout_secs > 0,
            "server.timeout_secs must be > 0, got {}",
            self.server.timeout_secs
        );
        Ok(())
    }
}
