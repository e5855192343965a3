//! Excel生成（共通ライブラリ）
//!
//! 現在のビューを1シートの一覧表として出力する。
//! CSVエクスポートと同じ11列で、値は `"` で囲まずそのまま書き込む。

use super::csv_core::EXPORT_HEADERS;
use crate::error::{Error, Result};
use crate::store::RecordStore;
use crate::types::Record;
use rust_xlsxwriter::*;

const SHEET_NAME: &str = "Prospects";

/// 列幅（EXPORT_HEADERS と同じ順）
const COLUMN_WIDTHS: [f64; 11] = [34.0, 20.0, 14.0, 40.0, 16.0, 32.0, 28.0, 50.0, 50.0, 18.0, 40.0];

const TITLE_ROW: u32 = 0;
const HEADER_ROW: u32 = 2;

/// Excelをバッファに生成
///
/// # Arguments
/// * `store` - アノテーション取得元のストア
/// * `view` - 出力するレコード（この順で書き込む）
/// * `title` - 1行目に表示するタイトル
pub fn generate_excel_buffer(store: &RecordStore, view: &[&Record], title: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let title_format = Format::new().set_bold().set_font_size(14.0);

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x1FB8CD))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_align(FormatAlign::Top)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(excel_error("シート名設定エラー"))?;

    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M");
    let heading = format!("{} ({} / {})", title, crate::store::view_label(view.len()), generated);
    worksheet
        .write_string_with_format(TITLE_ROW, 0, &heading, &title_format)
        .map_err(excel_error("タイトル書き込みエラー"))?;

    for (col, (header, width)) in EXPORT_HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, width)
            .map_err(excel_error("列幅設定エラー"))?;
        worksheet
            .write_string_with_format(HEADER_ROW, col, *header, &header_format)
            .map_err(excel_error("ヘッダー書き込みエラー"))?;
    }

    for (index, record) in view.iter().enumerate() {
        let row = HEADER_ROW + 1 + index as u32;
        for (col, value) in row_values(store, record).iter().enumerate() {
            worksheet
                .write_string_with_format(row, col as u16, value, &value_format)
                .map_err(excel_error("値書き込みエラー"))?;
        }
    }

    if !view.is_empty() {
        let last_row = HEADER_ROW + view.len() as u32;
        let last_col = (EXPORT_HEADERS.len() - 1) as u16;
        worksheet
            .autofilter(HEADER_ROW, 0, last_row, last_col)
            .map_err(excel_error("オートフィルタ設定エラー"))?;
    }
    worksheet
        .set_freeze_panes(HEADER_ROW + 1, 0)
        .map_err(excel_error("ウィンドウ枠固定エラー"))?;

    workbook
        .save_to_buffer()
        .map_err(excel_error("Excel保存エラー"))
}

/// 1レコード分のセル値（アノテーション込み、欠損値は空文字）
fn row_values(store: &RecordStore, record: &Record) -> Vec<String> {
    let annotation = store.annotation(record.name());
    vec![
        record.name().to_string(),
        record.kind().to_string(),
        record.location().to_string(),
        record.address().unwrap_or_default().to_string(),
        record.phone().unwrap_or_default().to_string(),
        record.email().unwrap_or_default().to_string(),
        record.website().unwrap_or_default().to_string(),
        record.description().unwrap_or_default().to_string(),
        record.opportunity().unwrap_or_default().to_string(),
        annotation.status.label().to_string(),
        annotation.notes,
    ]
}

fn excel_error(context: &'static str) -> impl Fn(XlsxError) -> Error {
    move |e| Error::Excel(format!("{}: {}", context, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;

    #[test]
    fn test_row_values_include_annotation() {
        let mut store = RecordStore::from_csv("name,type,location\nAlpha Ltd,B2B Company,Leeds").unwrap();
        store.set_annotation("Alpha Ltd", Status::Contacted, "left voicemail").unwrap();

        let values = row_values(&store, &store.records()[0]);
        assert_eq!(values.len(), 11);
        assert_eq!(values[0], "Alpha Ltd");
        assert_eq!(values[3], "");
        assert_eq!(values[9], "Contacted");
        assert_eq!(values[10], "left voicemail");
    }

    #[test]
    fn test_generate_excel_buffer() {
        let store = crate::sample::load().unwrap();
        let view = store.current_view();
        let buffer = generate_excel_buffer(&store, &view, "Prospects").unwrap();
        // xlsx は zip 形式
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_excel_buffer_empty_view() {
        let store = crate::sample::load().unwrap();
        let buffer = generate_excel_buffer(&store, &[], "Empty").unwrap();
        assert!(!buffer.is_empty());
    }
}
