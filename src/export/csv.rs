//! CSV出力

use crate::error::Result;
use prospect_common::{Record, RecordStore};
use std::path::Path;

pub fn generate_csv(store: &RecordStore, view: &[&Record], output_path: &Path) -> Result<()> {
    let content = store.export_csv(view);
    std::fs::write(output_path, content)?;
    Ok(())
}
