//! データ読み込みモジュール
//!
//! 起動時に1回だけCSVテキストを取得し、ストアを構築する。
//! 読み込みに失敗した場合は `LoadState::Unavailable` を返し、再試行はしない。

use crate::error::{ProspectError, Result};
use prospect_common::{sample, RecordStore};
use std::path::PathBuf;

/// CSVの読み込み元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// 組み込みサンプル
    Sample,
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// 設定値・CLI引数から読み込み元を決定
    pub fn from_setting(setting: Option<&str>) -> Self {
        match setting.map(str::trim) {
            None | Some("") => DataSource::Sample,
            Some(s) if s.starts_with("http://") || s.starts_with("https://") => {
                DataSource::Url(s.to_string())
            }
            Some(s) => DataSource::File(PathBuf::from(s)),
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Sample => write!(f, "組み込みサンプル"),
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// 読み込み結果
#[derive(Debug)]
pub enum LoadState {
    Ready(RecordStore),
    /// データを利用できない（理由）
    Unavailable(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    pub fn into_store(self) -> Result<RecordStore> {
        match self {
            LoadState::Ready(store) => Ok(store),
            LoadState::Unavailable(reason) => Err(ProspectError::DataUnavailable(reason)),
        }
    }
}

/// CSVテキストを取得
pub async fn fetch_text(source: &DataSource) -> Result<String> {
    match source {
        DataSource::Sample => Ok(sample::SAMPLE_CSV.to_string()),
        DataSource::File(path) => {
            if !path.exists() {
                return Err(ProspectError::FileNotFound(path.display().to_string()));
            }
            Ok(tokio::fs::read_to_string(path).await?)
        }
        DataSource::Url(url) => {
            let response = reqwest::get(url).await?.error_for_status()?;
            Ok(response.text().await?)
        }
    }
}

/// 読み込み元からストアを構築
pub async fn load(source: &DataSource) -> LoadState {
    let result = match fetch_text(source).await {
        Ok(text) => RecordStore::from_csv(&text).map_err(ProspectError::from),
        Err(e) => Err(e),
    };

    match result {
        Ok(store) => {
            tracing::info!(source = %source, records = store.len(), "データ読み込み完了");
            LoadState::Ready(store)
        }
        Err(e) => {
            tracing::warn!(source = %source, error = %e, "データ読み込み失敗");
            LoadState::Unavailable(e.to_string())
        }
    }
}
