//! CSVデコーダ
//!
//! 生のCSVテキストをレコード列に変換する。
//!
//! クォートの扱いは寛容モード:
//! - `"` が現れるたびに「クォート内」フラグを反転する（`"` 自体は値に含めない）
//! - クォート内の `,` は区切りではなく値の一部
//! - `""` によるエスケープは非対応。閉じていないクォートは行末まで1フィールドになる

use crate::error::{Error, Result};
use crate::types::Record;

/// CSVテキストをデコード
///
/// 1行目をヘッダー（列名）とし、2行目以降を列名と位置で対応付ける。
/// フィールドが足りない行は末尾の列が `None` になる。
///
/// # Errors
/// * `Error::EmptyInput` - 入力が空白のみでヘッダー行がない場合
///
/// # Examples
/// ```
/// use prospect_common::decode;
///
/// let records = decode("name,type,location\n\"Acme, Inc.\",X,Y\n").unwrap();
/// assert_eq!(records[0].get("name"), Some("Acme, Inc."));
/// assert_eq!(records[0].get("location"), Some("Y"));
/// ```
pub fn decode(raw: &str) -> Result<Vec<Record>> {
    let trimmed = raw.trim();
    let mut lines = trimmed.lines();

    let header_line = match lines.next() {
        Some(line) if !trimmed.is_empty() => line,
        _ => return Err(Error::EmptyInput),
    };
    let headers = split_line(header_line);

    let records: Vec<Record> = lines
        .map(|line| {
            let mut values = split_line(line).into_iter();
            headers
                .iter()
                .map(|header| (header.clone(), values.next()))
                .collect()
        })
        .collect();

    tracing::debug!(columns = headers.len(), records = records.len(), "CSVデコード完了");

    Ok(records)
}

/// CSVの1行をフィールドに分割（ダブルクォート対応）
///
/// 各フィールドは前後の空白を除去して返す。
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut current = String::new();

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    // 最後のフィールド
    fields.push(current.trim().to_string());

    fields
}
