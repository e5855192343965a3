pub mod csv;
pub mod excel;
pub mod json;

use crate::cli::ExportFormat;
use crate::error::Result;
use prospect_common::{view_label, Record, RecordStore};
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_STEM: &str = "prospects_export";

/// 出力先パスを決定
///
/// ディレクトリ・拡張子なしの場合は既定のファイル名を付与し、
/// ファイル指定の場合は拡張子を出力形式に合わせる。
pub fn output_path_for_format(output: &Path, format: ExportFormat) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", DEFAULT_FILE_STEM, format.extension()))
    } else {
        output.with_extension(format.extension())
    }
}

/// ビューをファイルに出力し、出力先パスを返す
pub fn export_view(
    store: &RecordStore,
    view: &[&Record],
    format: ExportFormat,
    output: &Path,
    title: &str,
) -> Result<PathBuf> {
    let output_path = output_path_for_format(output, format);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        ExportFormat::Csv => {
            println!("- CSVを生成中... ({})", view_label(view.len()));
            csv::generate_csv(store, view, &output_path)?;
        }
        ExportFormat::Excel => {
            println!("- Excelを生成中... ({})", view_label(view.len()));
            excel::generate_excel(store, view, &output_path, title)?;
        }
        ExportFormat::Json => {
            println!("- JSONを生成中... ({})", view_label(view.len()));
            json::generate_json(store, view, &output_path)?;
        }
    }

    tracing::info!(path = %output_path.display(), format = %format, records = view.len(), "エクスポート完了");
    println!("✔ {}出力: {}", format, output_path.display());

    Ok(output_path)
}
