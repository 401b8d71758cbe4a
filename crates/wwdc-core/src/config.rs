use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::patterns::CURRENT_YEAR;
use crate::policy::Quality;

/// External program used for segmented-stream (HLS) downloads.
///
/// Each entry of `args` may contain the placeholders `{url}`, `{dir}`,
/// `{name}` (file stem) and `{output}` (temporary destination path). The
/// program must write to `{output}`; it is renamed into place on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            args: vec![
                "-hide_banner".to_string(),
                "-loglevel".to_string(),
                "error".to_string(),
                "-i".to_string(),
                "{url}".to_string(),
                "-c".to_string(),
                "copy".to_string(),
                "-f".to_string(),
                "mp4".to_string(),
                "{output}".to_string(),
            ],
        }
    }
}

/// Global configuration loaded from `~/.config/wwdc-dl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WwdcConfig {
    /// Base of the video catalog; listing pages live under `<base>/play/wwdc<year>/<id>/`.
    pub site_base_url: String,
    /// Year used when `--year` is not given.
    pub default_year: String,
    /// Quality used when `--quality` is not given.
    pub default_quality: Quality,
    /// Root under which `WWDC-<year>` directories are created. None = ~/Documents.
    #[serde(default)]
    pub download_root: Option<PathBuf>,
    pub user_agent: String,
    pub connect_timeout_secs: u64,
    /// Overall timeout for page requests (media transfers are not time-limited).
    pub timeout_secs: u64,
    #[serde(default)]
    pub stream: StreamConfig,
}

impl Default for WwdcConfig {
    fn default() -> Self {
        Self {
            site_base_url: "https://developer.apple.com/videos".to_string(),
            default_year: CURRENT_YEAR.to_string(),
            default_quality: Quality::Sd,
            download_root: None,
            user_agent: concat!("wwdc-dl/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 30,
            stream: StreamConfig::default(),
        }
    }
}

impl WwdcConfig {
    /// Download root: configured value, else `~/Documents`, else the current directory.
    pub fn resolved_download_root(&self) -> Result<PathBuf> {
        if let Some(root) = &self.download_root {
            return Ok(root.clone());
        }
        if let Some(home) = std::env::var_os("HOME") {
            return Ok(PathBuf::from(home).join("Documents"));
        }
        Ok(std::env::current_dir()?)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("wwdc-dl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<WwdcConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = WwdcConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: WwdcConfig = toml::from_str(&data)?;
    Ok(cfg)
}
