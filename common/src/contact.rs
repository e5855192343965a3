//! 連絡先表示ヘルパー
//!
//! 電話・メール・Webサイトの値が未設定（空・"TBD"・"Contact via website"）の場合は
//! プレースホルダーを表示し、リンクを生成しない。

use crate::types::Record;

const PLACEHOLDER_VALUES: [&str; 2] = ["TBD", "Contact via website"];

/// 連絡先の値が利用できないか
pub fn is_unavailable(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => {
            let v = v.trim();
            v.is_empty() || PLACEHOLDER_VALUES.contains(&v)
        }
    }
}

/// 表示用の値（利用できなければ fallback）
pub fn contact_display<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    if is_unavailable(value) {
        fallback
    } else {
        value.unwrap_or(fallback)
    }
}

/// `tel:` リンク
pub fn phone_link(record: &Record) -> Option<String> {
    available(record.phone()).map(|phone| format!("tel:{}", phone))
}

/// `mailto:` リンク
pub fn email_link(record: &Record) -> Option<String> {
    available(record.email()).map(|email| format!("mailto:{}", email))
}

/// Webサイトの URL（スキームなしの値に https:// を付与）
pub fn website_url(record: &Record) -> Option<String> {
    available(record.website()).map(|site| {
        if site.starts_with("http://") || site.starts_with("https://") {
            site.to_string()
        } else {
            format!("https://{}", site)
        }
    })
}

fn available(value: Option<&str>) -> Option<&str> {
    if is_unavailable(value) { None } else { value }
}
