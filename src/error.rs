use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProspectError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("見込み客が見つかりません: {0}")]
    ProspectNotFound(String),

    #[error("データを読み込めません: {0}")]
    DataUnavailable(String),

    #[error("データ取得エラー: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),

    #[error(transparent)]
    Common(#[from] prospect_common::Error),
}

pub type Result<T> = std::result::Result<T, ProspectError>;
