//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use prospect_common::{RecordStore, Status};
use prospect_tracker::error::ProspectError;

/// 空の入力からはストアを構築できない
#[test]
fn test_empty_input_is_error() {
    let result = RecordStore::from_csv("\n  \n");
    assert!(matches!(result, Err(prospect_common::Error::EmptyInput)));
}

/// 閉じていないクォートはエラーにならない
#[test]
fn test_unterminated_quote_is_lenient() {
    let store = RecordStore::from_csv("name,type,location\n\"Broken, Ltd,B2B Company,Leeds").unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].name(), "Broken, Ltd,B2B Company,Leeds");
}

/// 存在しない名前へのアノテーション
#[test]
fn test_unknown_record_annotation() {
    let mut store = prospect_common::sample::load().unwrap();
    let err: ProspectError = store
        .set_annotation("Unknown Org", Status::Contacted, "")
        .unwrap_err()
        .into();

    assert!(matches!(err, ProspectError::Common(prospect_common::Error::UnknownRecord(_))));
    assert!(format!("{}", err).contains("Unknown Org"));
}

/// ProspectErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ProspectError::Config("テスト設定エラー".to_string()),
        ProspectError::FileNotFound("prospects.csv".to_string()),
        ProspectError::ProspectNotFound("Peak AI".to_string()),
        ProspectError::DataUnavailable("404".to_string()),
        ProspectError::ExcelGeneration("Excel生成エラー".to_string()),
        ProspectError::CliExecution("入力エラー".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = ProspectError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: ProspectError = io_err.into();

    assert!(matches!(err, ProspectError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: ProspectError = json_err.into();

    assert!(matches!(err, ProspectError::JsonParse(_)));
}

/// common::Errorは透過的に表示される
#[test]
fn test_common_error_transparent() {
    let err: ProspectError = prospect_common::Error::EmptyInput.into();

    assert!(matches!(err, ProspectError::Common(_)));
    assert_eq!(format!("{}", err), format!("{}", prospect_common::Error::EmptyInput));
}
