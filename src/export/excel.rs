//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを生成し、ファイルに書き込む

use crate::error::{ProspectError, Result};
use prospect_common::export::excel_core::generate_excel_buffer;
use prospect_common::{Record, RecordStore};
use std::path::Path;

pub fn generate_excel(
    store: &RecordStore,
    view: &[&Record],
    output_path: &Path,
    title: &str,
) -> Result<()> {
    let buffer = generate_excel_buffer(store, view, title)
        .map_err(|e| ProspectError::ExcelGeneration(e.to_string()))?;

    std::fs::write(output_path, buffer)
        .map_err(|e| ProspectError::ExcelGeneration(format!("ファイル書き込みエラー: {}", e)))?;

    Ok(())
}
