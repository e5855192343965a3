//! Prospect Tracker Common Library
//!
//! CSVデコーダ・レコードストア・フィルタエンジンなど、
//! 表示層（CLI）から利用されるコア機能

pub mod types;
pub mod error;
pub mod decoder;
pub mod store;
pub mod contact;
pub mod sample;
pub mod export;

pub use types::{Annotation, Record, Status, COLUMNS};
pub use error::{Error, Result};
pub use decoder::{decode, split_line};
pub use store::{view_label, DashboardStats, RecordStore, ViewQuery};
pub use contact::{contact_display, is_unavailable};
pub use export::csv_core::{EXPORT_HEADERS, wrap_field};
