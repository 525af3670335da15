use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the per-request timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "HASHFETCH_TIMEOUT";

/// Per-request timeout used when neither the environment nor the config file set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Most common desktop browser User-Agent at the time the tool was written.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/81.0.4044.138 Safari/537.36";

/// Global configuration loaded from `~/.config/hashfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashfetchConfig {
    /// Parallelism used when `--parallel` is not given.
    pub default_parallel: usize,
    /// Per-request timeout in seconds (connect + read). 0 disables the timeout.
    pub timeout_secs: u64,
    /// Value of the `User-Agent` header sent with every GET.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Maximum redirects followed per request.
    #[serde(default = "default_max_redirections")]
    pub max_redirections: u32,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_max_redirections() -> u32 {
    10
}

impl Default for HashfetchConfig {
    fn default() -> Self {
        Self {
            default_parallel: 10,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
            max_redirections: default_max_redirections(),
        }
    }
}

impl HashfetchConfig {
    /// Effective timeout for this process: `HASHFETCH_TIMEOUT` wins over the config file.
    pub fn timeout(&self) -> Duration {
        resolve_timeout(std::env::var(TIMEOUT_ENV).ok().as_deref(), self.timeout_secs)
    }
}

/// Resolves the timeout from an optional override string and the configured seconds.
/// An override that is not a whole non-negative number is ignored.
pub fn resolve_timeout(env_value: Option<&str>, configured_secs: u64) -> Duration {
    match env_value.map(|v| v.trim().parse::<u64>()) {
        Some(Ok(secs)) => Duration::from_secs(secs),
        Some(Err(_)) => {
            tracing::warn!("ignoring invalid {} value", TIMEOUT_ENV);
            Duration::from_secs(configured_secs)
        }
        None => Duration::from_secs(configured_secs),
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hashfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HashfetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HashfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<HashfetchConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: HashfetchConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
