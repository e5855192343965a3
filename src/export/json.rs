//! JSON出力
//!
//! 各レコードの列にステータスとメモを加えたオブジェクトの配列

use crate::error::Result;
use prospect_common::{Record, RecordStore, Status};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
pub struct ExportedProspect<'a> {
    #[serde(flatten)]
    pub record: &'a Record,
    pub status: Status,
    pub notes: String,
}

pub fn to_exported<'a>(store: &RecordStore, view: &[&'a Record]) -> Vec<ExportedProspect<'a>> {
    view.iter()
        .map(|&record| {
            let annotation = store.annotation(record.name());
            ExportedProspect {
                record,
                status: annotation.status,
                notes: annotation.notes,
            }
        })
        .collect()
}

pub fn generate_json(store: &RecordStore, view: &[&Record], output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&to_exported(store, view))?;
    std::fs::write(output_path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exported_prospect_flattens_record() {
        let mut store = prospect_common::RecordStore::from_csv("name,type\nAlpha Ltd,B2B Company").unwrap();
        store.set_annotation("Alpha Ltd", Status::Closed, "won").unwrap();

        let view = store.current_view();
        let value = serde_json::to_value(to_exported(&store, &view)).unwrap();
        assert_eq!(value[0]["name"], "Alpha Ltd");
        assert_eq!(value[0]["type"], "B2B Company");
        assert_eq!(value[0]["status"], "Closed");
        assert_eq!(value[0]["notes"], "won");
    }
}
