//! 組み込みサンプルデータ
//!
//! データソース未設定時に使用する北西イングランドの見込み客リスト（25件）

use crate::error::Result;
use crate::store::RecordStore;

pub const SAMPLE_CSV: &str = include_str!("../data/prospects.csv");

/// サンプルデータからストアを構築
pub fn load() -> Result<RecordStore> {
    RecordStore::from_csv(SAMPLE_CSV)
}
