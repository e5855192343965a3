//! CSVエクスポート（共通ライブラリ）
//!
//! 各セルを `"` で囲んで出力する。値の中の `"` はエスケープしない
//! （デコーダと同じ制約）。

/// エクスポートのヘッダー行
pub const EXPORT_HEADERS: [&str; 11] = [
    "Name",
    "Type",
    "Location",
    "Address",
    "Phone",
    "Email",
    "Website",
    "Description",
    "AI Opportunity",
    "Status",
    "Notes",
];

/// セルを `"` で囲む（欠損値は空文字）
pub fn wrap_field(value: Option<&str>) -> String {
    format!("\"{}\"", value.unwrap_or(""))
}

/// 行をCSVテキストに結合（行末の改行なし）
pub fn join_rows<R: AsRef<[String]>>(rows: &[R]) -> String {
    rows.iter()
        .map(|row| row.as_ref().join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

/// ヘッダー行（ラップ済み）
pub fn header_row() -> Vec<String> {
    EXPORT_HEADERS.iter().map(|h| wrap_field(Some(*h))).collect()
}
