//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty input: CSV header line is missing")]
    EmptyInput,

    #[error("Unknown record: {0}")]
    UnknownRecord(String),

    #[error("Excel error: {0}")]
    Excel(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_empty_input() {
        let error = Error::EmptyInput;
        let display = format!("{}", error);
        assert!(display.contains("header"));
    }

    #[test]
    fn test_error_display_unknown_record() {
        let error = Error::UnknownRecord("Acme Ltd".to_string());
        assert_eq!(format!("{}", error), "Unknown record: Acme Ltd");
    }

    #[test]
    fn test_error_display_excel() {
        let error = Error::Excel("save: disk full".to_string());
        assert!(format!("{}", error).contains("disk full"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownRecord("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownRecord"));
        assert!(debug.contains("テスト"));
    }
}
