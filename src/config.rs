use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Saver configuration loaded from `~/.config/aurastream/saver.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaverConfig {
    /// Pause between batch dispatches in milliseconds. Browsers throttle
    /// or block back-to-back programmatic downloads; keep at 300 unless
    /// a host is known to tolerate less.
    pub batch_delay_ms: u64,
    /// Grace delay in milliseconds before a temporary object URL is
    /// revoked, so the save has started before the URL goes away.
    pub revoke_grace_ms: u64,
    /// Download directory for the native host (None = host default).
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

impl Default for SaverConfig {
    fn default() -> Self {
        Self {
            batch_delay_ms: 300,
            revoke_grace_ms: 100,
            download_dir: None,
        }
    }
}

impl SaverConfig {
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn revoke_grace(&self) -> Duration {
        Duration::from_millis(self.revoke_grace_ms)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("aurastream")?;
    Ok(xdg_dirs.place_config_file("saver.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SaverConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SaverConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SaverConfig = toml::from_str(&data)?;
    Ok(cfg)
}
