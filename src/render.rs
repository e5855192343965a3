//! 端末表示モジュール
//!
//! 一覧表・詳細・集計をテキストに整形する（出力は呼び出し側）

use prospect_common::contact::{email_link, phone_link, website_url};
use prospect_common::{contact_display, view_label, Record, RecordStore, Status};
use std::fmt::Write;

const NAME_WIDTH: usize = 34;
const TYPE_WIDTH: usize = 20;
const LOCATION_WIDTH: usize = 12;
const PHONE_WIDTH: usize = 16;
const EMAIL_WIDTH: usize = 28;

/// 一覧表
pub fn render_table(store: &RecordStore, view: &[&Record]) -> String {
    if view.is_empty() {
        return "No prospects found\nTry adjusting your search or filter criteria\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<NAME_WIDTH$} {:<TYPE_WIDTH$} {:<LOCATION_WIDTH$} {:<PHONE_WIDTH$} {:<EMAIL_WIDTH$} STATUS",
        "NAME", "TYPE", "LOCATION", "PHONE", "EMAIL"
    );
    let _ = writeln!(
        out,
        "{}",
        "-".repeat(NAME_WIDTH + TYPE_WIDTH + LOCATION_WIDTH + PHONE_WIDTH + EMAIL_WIDTH + 23)
    );

    for record in view {
        let status = store.annotation(record.name()).status;
        let _ = writeln!(
            out,
            "{:<NAME_WIDTH$} {:<TYPE_WIDTH$} {:<LOCATION_WIDTH$} {:<PHONE_WIDTH$} {:<EMAIL_WIDTH$} {}",
            fit(record.name(), NAME_WIDTH),
            fit(record.kind(), TYPE_WIDTH),
            fit(record.location(), LOCATION_WIDTH),
            fit(contact_display(record.phone(), "-"), PHONE_WIDTH),
            fit(contact_display(record.email(), "-"), EMAIL_WIDTH),
            status,
        );
    }

    let _ = writeln!(out, "\n{}", view_label(view.len()));
    out
}

/// 詳細表示
pub fn render_detail(store: &RecordStore, record: &Record) -> String {
    let annotation = store.annotation(record.name());
    let mut out = String::new();

    let _ = writeln!(out, "{}", record.name());
    let _ = writeln!(out, "{}", "=".repeat(record.name().chars().count().max(8)));
    let _ = writeln!(out, "  種別:     {}", record.kind());
    let _ = writeln!(out, "  所在地:   {}", record.location());
    let _ = writeln!(out, "  住所:     {}", contact_display(record.address(), "Address not available"));
    let _ = writeln!(out, "  電話:     {}", link_or(phone_link(record), record.phone(), "Contact via website"));
    let _ = writeln!(out, "  メール:   {}", link_or(email_link(record), record.email(), "Email not available"));
    let _ = writeln!(out, "  Web:      {}", website_url(record).unwrap_or_else(|| "Website not available".into()));
    let _ = writeln!(out, "  概要:     {}", contact_display(record.description(), "No description available"));
    let _ = writeln!(
        out,
        "  AI提案:   {}",
        contact_display(record.opportunity(), "No opportunity details available")
    );
    let _ = writeln!(out, "  ステータス: {}", annotation.status);
    let _ = writeln!(out, "  メモ:     {}", if annotation.notes.is_empty() { "-" } else { annotation.notes.as_str() });

    out
}

/// 集計表示
pub fn render_stats(store: &RecordStore, top: usize) -> String {
    let stats = store.stats();
    let mut out = String::new();

    let _ = writeln!(out, "合計: {}", view_label(stats.total));
    let _ = writeln!(out, "  Public Body:          {}", stats.public_bodies);
    let _ = writeln!(out, "  Cultural Institution: {}", stats.cultural_institutions);
    let _ = writeln!(out, "  B2B Company:          {}", stats.b2b_companies);
    let _ = writeln!(out, "  Funding Body:         {}", stats.funding_bodies);

    let _ = writeln!(out, "\n種別ごとの件数:");
    for (kind, count) in store.summary_counts() {
        let _ = writeln!(out, "  {:<24} {:>3} {}", kind, count, bar(count));
    }

    let _ = writeln!(out, "\n所在地 上位{}:", top);
    for (location, count) in store.top_locations(top) {
        let _ = writeln!(out, "  {:<24} {:>3} {}", location, count, bar(count));
    }

    let _ = writeln!(out, "\nステータス:");
    let counts = store.status_counts();
    for status in Status::ALL {
        let count = counts.get(&status).copied().unwrap_or(0);
        let _ = writeln!(out, "  {:<24} {:>3}", status.label(), count);
    }

    out
}

fn link_or(link: Option<String>, value: Option<&str>, fallback: &str) -> String {
    match link {
        Some(link) => format!("{} <{}>", value.unwrap_or_default(), link),
        None => fallback.to_string(),
    }
}

fn bar(count: usize) -> String {
    "█".repeat(count)
}

/// 表示幅に収める（超える場合は末尾を … に置換）
fn fit(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let truncated: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecordStore {
        prospect_common::sample::load().unwrap()
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("short", 10), "short");
        assert_eq!(fit("abcdefghij", 5), "abcd…");
        assert_eq!(fit("abcde", 5), "abcde");
    }

    #[test]
    fn test_render_table_empty() {
        let store = store();
        let out = render_table(&store, &[]);
        assert!(out.contains("No prospects found"));
    }

    #[test]
    fn test_render_table_lists_view() {
        let mut store = store();
        store.set_location_filter(Some("Salford"));
        let view = store.current_view();
        let out = render_table(&store, &view);
        assert!(out.contains("The Lowry"));
        assert!(out.lines().next().unwrap().contains("EMAIL"));
        assert!(out.contains("info@thelowry.com"));
        assert!(out.contains("0161 876 2000"));
        assert!(out.contains("Not Contacted"));
        assert!(out.trim_end().ends_with("1 prospect"));
    }

    #[test]
    fn test_render_detail_placeholders() {
        let store = store();
        let record = store.find("Kyndryl").unwrap();
        let out = render_detail(&store, record);
        assert!(out.contains("Contact via website"));
        assert!(out.contains("mailto:info@kyndryl.com"));
        assert!(out.contains("https://kyndryl.com"));
    }

    #[test]
    fn test_render_stats() {
        let out = render_stats(&store(), 3);
        assert!(out.contains("合計: 25 prospects"));
        assert!(out.contains("Manchester"));
        assert!(out.contains("Follow-up Required"));
    }
}
