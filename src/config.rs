use crate::error::{ProspectError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CSVデータのパスまたはURL（未設定なら組み込みサンプル）
    pub data_source: Option<String>,
    pub export_dir: PathBuf,
    pub default_export_format: String,
    pub export_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "設定ファイル読み込み");
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ProspectError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("prospect-tracker").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            data_source: None,
            export_dir: PathBuf::from("."),
            default_export_format: "csv".into(),
            export_title: "Prospects".into(),
        }
    }

    /// 読み込み元を決定（CLI引数を優先）
    pub fn resolve_source(&self, cli_source: Option<&str>) -> Option<String> {
        cli_source
            .map(|s| s.to_string())
            .or_else(|| self.data_source.clone())
            .filter(|s| !s.trim().is_empty())
    }

    pub fn set_source(&mut self, source: String) -> Result<()> {
        self.data_source = Some(source);
        self.save()
    }

    pub fn set_export_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.export_dir = dir;
        self.save()
    }
}
