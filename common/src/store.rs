//! レコードストア・フィルタエンジン
//!
//! 読み込み済みレコード（不変）、名前をキーにしたアノテーション表、
//! 現在の検索・絞り込み条件を1つの構造体で保持する。
//!
//! ## ビューの計算
//! `current_view()` は呼ばれるたびに全レコードから再計算する。
//! 1. 検索語（name/type/location/description/ai_opportunity の部分一致、大文字小文字無視）
//! 2. 種別フィルタ（完全一致）
//! 3. 所在地フィルタ（完全一致）
//!
//! 条件を設定する順序は結果に影響しない。

use crate::error::{Error, Result};
use crate::export::csv_core::{header_row, join_rows, wrap_field};
use crate::types::{Annotation, Record, Status, SEARCH_COLUMNS};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// 検索・絞り込み条件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewQuery {
    pub search: String,
    pub type_filter: Option<String>,
    pub location_filter: Option<String>,
}

impl ViewQuery {
    /// 条件が何も設定されていないか
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.type_filter.is_none() && self.location_filter.is_none()
    }
}

/// 集計値（全レコード対象、フィルタの影響を受けない）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub public_bodies: usize,
    pub cultural_institutions: usize,
    pub b2b_companies: usize,
    pub funding_bodies: usize,
}

/// レコードストア
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    annotations: HashMap<String, Annotation>,
    query: ViewQuery,
}

impl RecordStore {
    /// レコード列からストアを構築
    ///
    /// 全レコードにデフォルトのアノテーション（Not Contacted, メモなし）を作成する。
    /// 同名のレコードはアノテーションを共有する。
    pub fn new(records: Vec<Record>) -> Self {
        let mut annotations = HashMap::new();
        for record in &records {
            annotations
                .entry(record.name().to_string())
                .or_insert_with(Annotation::default);
        }

        let store = Self {
            records,
            annotations,
            query: ViewQuery::default(),
        };

        let duplicates = store.duplicate_names();
        if !duplicates.is_empty() {
            tracing::warn!(
                names = ?duplicates,
                "同名のレコードがあります。アノテーションは共有されます"
            );
        }

        store
    }

    /// CSVテキストをデコードしてストアを構築
    pub fn from_csv(raw: &str) -> Result<Self> {
        let records = crate::decoder::decode(raw)?;
        Ok(Self::new(records))
    }

    /// 全レコード（読み込み順）
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 名前でレコードを検索（同名の場合は最初の1件）
    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name() == name)
    }

    // =============================================
    // 検索・絞り込み条件
    // =============================================

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn set_search(&mut self, term: &str) {
        self.query.search = term.to_string();
    }

    /// 種別フィルタ（`None` または空文字で解除）
    pub fn set_type_filter(&mut self, value: Option<&str>) {
        self.query.type_filter = normalize_filter(value);
    }

    /// 所在地フィルタ（`None` または空文字で解除）
    pub fn set_location_filter(&mut self, value: Option<&str>) {
        self.query.location_filter = normalize_filter(value);
    }

    pub fn clear_filters(&mut self) {
        self.query = ViewQuery::default();
    }

    /// 現在の条件に一致するレコード（読み込み順）
    pub fn current_view(&self) -> Vec<&Record> {
        let term = self.query.search.to_lowercase();

        let view: Vec<&Record> = self
            .records
            .iter()
            .filter(|r| term.is_empty() || matches_search(r, &term))
            .filter(|r| match &self.query.type_filter {
                Some(kind) => r.kind() == kind,
                None => true,
            })
            .filter(|r| match &self.query.location_filter {
                Some(location) => r.location() == location,
                None => true,
            })
            .collect();

        tracing::debug!(
            search = %self.query.search,
            type_filter = ?self.query.type_filter,
            location_filter = ?self.query.location_filter,
            matched = view.len(),
            "ビュー再計算"
        );

        view
    }

    // =============================================
    // アノテーション
    // =============================================

    /// アノテーションを取得（未設定ならデフォルト）
    pub fn annotation(&self, name: &str) -> Annotation {
        self.annotations.get(name).cloned().unwrap_or_default()
    }

    /// アノテーションを保存
    ///
    /// # Errors
    /// * `Error::UnknownRecord` - 該当する名前のレコードがない場合
    pub fn set_annotation(&mut self, name: &str, status: Status, notes: impl Into<String>) -> Result<()> {
        if self.find(name).is_none() {
            return Err(Error::UnknownRecord(name.to_string()));
        }

        let annotation = Annotation::new(status, notes);
        tracing::debug!(record = name, status = %annotation.status, "アノテーション保存");
        self.annotations.insert(name.to_string(), annotation);
        Ok(())
    }

    // =============================================
    // 集計（全レコード対象）
    // =============================================

    /// 所在地の一覧（重複除去・昇順）
    pub fn distinct_locations(&self) -> Vec<String> {
        let mut locations: Vec<String> = self
            .records
            .iter()
            .filter_map(|r| r.get("location"))
            .map(|s| s.to_string())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        locations.sort();
        locations
    }

    /// 種別の一覧（重複除去・昇順）
    pub fn distinct_types(&self) -> Vec<String> {
        self.summary_counts().into_keys().collect()
    }

    /// 種別ごとの件数
    pub fn summary_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for kind in self.records.iter().filter_map(|r| r.get("type")) {
            *counts.entry(kind.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// 所在地ごとの件数（件数の降順、同数は名前順）
    pub fn location_counts(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for location in self.records.iter().filter_map(|r| r.get("location")) {
            *counts.entry(location).or_insert(0) += 1;
        }

        let mut sorted: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(location, count)| (location.to_string(), count))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        sorted
    }

    /// 件数上位の所在地
    pub fn top_locations(&self, limit: usize) -> Vec<(String, usize)> {
        let mut counts = self.location_counts();
        counts.truncate(limit);
        counts
    }

    pub fn stats(&self) -> DashboardStats {
        let counts = self.summary_counts();
        let count = |kind: &str| counts.get(kind).copied().unwrap_or(0);

        DashboardStats {
            total: self.records.len(),
            public_bodies: count("Public Body"),
            cultural_institutions: count("Cultural Institution"),
            b2b_companies: count("B2B Company"),
            funding_bodies: count("Funding Body"),
        }
    }

    /// ステータスごとの件数（全レコードの現在のアノテーション）
    pub fn status_counts(&self) -> BTreeMap<Status, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            let status = self.annotation(record.name()).status;
            *counts.entry(status).or_insert(0) += 1;
        }
        counts
    }

    /// 2回以上出現する名前
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for name in self.records.iter().map(|r| r.name()) {
            if !seen.insert(name) && !duplicates.iter().any(|d| d == name) {
                duplicates.push(name.to_string());
            }
        }
        duplicates
    }

    // =============================================
    // エクスポート
    // =============================================

    /// ビューを11列の行に変換（各セルは `"` で囲む）
    pub fn export_rows(&self, view: &[&Record]) -> Vec<Vec<String>> {
        view.iter()
            .map(|record| {
                let annotation = self.annotation(record.name());
                vec![
                    wrap_field(record.get("name")),
                    wrap_field(record.get("type")),
                    wrap_field(record.get("location")),
                    wrap_field(record.address()),
                    wrap_field(record.phone()),
                    wrap_field(record.email()),
                    wrap_field(record.website()),
                    wrap_field(record.description()),
                    wrap_field(record.opportunity()),
                    wrap_field(Some(annotation.status.label())),
                    wrap_field(Some(annotation.notes.as_str())),
                ]
            })
            .collect()
    }

    /// ビューをCSVテキストに変換（ヘッダー行付き、末尾改行なし）
    pub fn export_csv(&self, view: &[&Record]) -> String {
        let mut rows = vec![header_row()];
        rows.extend(self.export_rows(view));
        join_rows(&rows)
    }
}

/// 件数表示（"1 prospect" / "3 prospects"）
pub fn view_label(count: usize) -> String {
    format!("{} prospect{}", count, if count == 1 { "" } else { "s" })
}

fn normalize_filter(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(|v| v.to_string())
}

fn matches_search(record: &Record, term: &str) -> bool {
    SEARCH_COLUMNS
        .iter()
        .any(|column| record.value(column).to_lowercase().contains(term))
}
