//! レコード・アノテーションの型定義
//!
//! - Record: CSVの1データ行（列名 → 値の順序付きマッピング）
//! - Status: 営業ステータス
//! - Annotation: レコードごとのステータス・メモ

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// データセットの列名（ヘッダー順）
pub const COLUMNS: [&str; 9] = [
    "name",
    "type",
    "location",
    "address",
    "phone",
    "email",
    "website",
    "description",
    "ai_opportunity",
];

/// 検索対象の列
pub const SEARCH_COLUMNS: [&str; 5] = ["name", "type", "location", "description", "ai_opportunity"];

/// CSVの1データ行
///
/// 列の並びはヘッダー行と同じ。行のフィールドが足りない場合、
/// 末尾の列は `None` になる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Option<String>)>,
}

impl Record {
    pub fn new(fields: Vec<(String, Option<String>)>) -> Self {
        Self { fields }
    }

    /// 列の値を取得（列が存在しない・値が欠けている場合は `None`）
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == column)
            .and_then(|(_, value)| value.as_deref())
    }

    /// 列の値を取得（欠けている場合は空文字）
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// 列名をヘッダー順に返す
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn name(&self) -> &str { self.value("name") }
    pub fn kind(&self) -> &str { self.value("type") }
    pub fn location(&self) -> &str { self.value("location") }
    pub fn address(&self) -> Option<&str> { self.get("address") }
    pub fn phone(&self) -> Option<&str> { self.get("phone") }
    pub fn email(&self) -> Option<&str> { self.get("email") }
    pub fn website(&self) -> Option<&str> { self.get("website") }
    pub fn description(&self) -> Option<&str> { self.get("description") }
    pub fn opportunity(&self) -> Option<&str> { self.get("ai_opportunity") }
}

impl FromIterator<(String, Option<String>)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// JSON出力ではヘッダー順のオブジェクトになる（欠損値は null）
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// 営業ステータス
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "Not Contacted")]
    NotContacted,
    #[serde(rename = "Contacted")]
    Contacted,
    #[serde(rename = "Meeting Scheduled")]
    MeetingScheduled,
    #[serde(rename = "Proposal Sent")]
    ProposalSent,
    #[serde(rename = "Follow-up Required")]
    FollowUpRequired,
    #[serde(rename = "Closed")]
    Closed,
}

impl Status {
    pub const ALL: [Status; 6] = [
        Status::NotContacted,
        Status::Contacted,
        Status::MeetingScheduled,
        Status::ProposalSent,
        Status::FollowUpRequired,
        Status::Closed,
    ];

    /// 表示ラベル
    pub fn label(&self) -> &'static str {
        match self {
            Status::NotContacted => "Not Contacted",
            Status::Contacted => "Contacted",
            Status::MeetingScheduled => "Meeting Scheduled",
            Status::ProposalSent => "Proposal Sent",
            Status::FollowUpRequired => "Follow-up Required",
            Status::Closed => "Closed",
        }
    }

    /// 短縮名（CLI引数用）
    pub fn slug(&self) -> &'static str {
        match self {
            Status::NotContacted => "not-contacted",
            Status::Contacted => "contacted",
            Status::MeetingScheduled => "meeting",
            Status::ProposalSent => "proposal",
            Status::FollowUpRequired => "follow-up",
            Status::Closed => "closed",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Status::ALL
            .iter()
            .copied()
            .find(|status| status.label().to_lowercase() == lower || status.slug() == lower)
            .ok_or_else(|| {
                let names: Vec<&str> = Status::ALL.iter().map(|s| s.slug()).collect();
                format!("Unknown status: {}. Use one of {}", s, names.join(", "))
            })
    }
}

/// レコードごとのステータスとメモ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Annotation {
    pub status: Status,
    pub notes: String,
}

impl Annotation {
    pub fn new(status: Status, notes: impl Into<String>) -> Self {
        Self { status, notes: notes.into() }
    }
}
