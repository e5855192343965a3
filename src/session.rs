//! 対話モード
//!
//! 検索・絞り込み・ステータス/メモ入力・エクスポートをメニューから繰り返し実行する。
//! メモはセッション中のみ保持し、ファイルには保存しない（エクスポートを除く）。

use crate::cli::ExportFormat;
use crate::config::Config;
use crate::error::{ProspectError, Result};
use crate::loader::LoadState;
use crate::{export, render};
use dialoguer::{Input, Select};
use prospect_common::{view_label, RecordStore, Status};

const ALL_LABEL: &str = "(すべて)";

/// 対話アクション
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Search(String),
    TypeFilter(Option<String>),
    LocationFilter(Option<String>),
    ClearFilters,
    List,
    Show(String),
    Annotate {
        name: String,
        status: Status,
        notes: String,
    },
    Export(ExportFormat),
    Quit,
}

const MENU: [&str; 9] = [
    "検索",
    "種別で絞り込み",
    "所在地で絞り込み",
    "条件をクリア",
    "一覧表示",
    "詳細表示",
    "ステータス・メモを編集",
    "エクスポート",
    "終了",
];

/// 対話モードを実行
pub fn run_session(state: LoadState, config: &Config) -> Result<()> {
    let mut store = match state {
        LoadState::Ready(store) => store,
        LoadState::Unavailable(reason) => {
            println!("⚠ データを読み込めません: {}", reason);
            println!("{}", render::render_table(&RecordStore::default(), &[]));
            return Ok(());
        }
    };

    println!("📋 prospect - 対話モード ({})\n", view_label(store.len()));

    loop {
        let action = prompt_action(&store)?;
        if !dispatch(&mut store, action, config)? {
            break;
        }
    }

    println!("終了します");
    Ok(())
}

/// アクションを実行し、入力系以外のエラーは表示して継続する
///
/// メモはメモリ上にしかないため、エクスポート失敗などでセッションを終了させない。
pub fn dispatch(store: &mut RecordStore, action: SessionAction, config: &Config) -> Result<bool> {
    match apply_action(store, action, config) {
        Ok(keep_going) => Ok(keep_going),
        Err(e @ ProspectError::CliExecution(_)) => Err(e),
        Err(e) => {
            tracing::warn!(error = %e, "操作失敗");
            println!("  ❌ エラー: {}\n", e);
            Ok(true)
        }
    }
}

/// アクションを適用（false を返したら終了）
pub fn apply_action(store: &mut RecordStore, action: SessionAction, config: &Config) -> Result<bool> {
    match action {
        SessionAction::Search(term) => {
            store.set_search(&term);
            println!("  → {}\n", view_label(store.current_view().len()));
        }
        SessionAction::TypeFilter(kind) => {
            store.set_type_filter(kind.as_deref());
            println!("  → {}\n", view_label(store.current_view().len()));
        }
        SessionAction::LocationFilter(location) => {
            store.set_location_filter(location.as_deref());
            println!("  → {}\n", view_label(store.current_view().len()));
        }
        SessionAction::ClearFilters => {
            store.clear_filters();
            println!("  → 条件をクリアしました ({})\n", view_label(store.len()));
        }
        SessionAction::List => {
            let view = store.current_view();
            println!("{}", render::render_table(store, &view));
        }
        SessionAction::Show(name) => {
            let record = store
                .find(&name)
                .ok_or_else(|| ProspectError::ProspectNotFound(name.clone()))?;
            println!("{}", render::render_detail(store, record));
        }
        SessionAction::Annotate { name, status, notes } => {
            store.set_annotation(&name, status, notes)?;
            println!("  → {}: {}\n", name, status);
        }
        SessionAction::Export(format) => {
            let view = store.current_view();
            export::export_view(store, &view, format, &config.export_dir, &config.export_title)?;
        }
        SessionAction::Quit => return Ok(false),
    }

    Ok(true)
}

fn prompt_action(store: &RecordStore) -> Result<SessionAction> {
    let query = store.query();
    println!(
        "条件: 検索=\"{}\" 種別={} 所在地={}",
        query.search,
        query.type_filter.as_deref().unwrap_or(ALL_LABEL),
        query.location_filter.as_deref().unwrap_or(ALL_LABEL),
    );

    let choice = select("操作を選択", &MENU, 4)?;

    match choice {
        0 => {
            let term: String = Input::new()
                .with_prompt("検索語（空でクリア）")
                .with_initial_text(query.search.clone())
                .allow_empty(true)
                .interact_text()
                .map_err(cli_error)?;
            Ok(SessionAction::Search(term.trim().to_string()))
        }
        1 => Ok(SessionAction::TypeFilter(select_filter("種別", store.distinct_types())?)),
        2 => Ok(SessionAction::LocationFilter(select_filter("所在地", store.distinct_locations())?)),
        3 => Ok(SessionAction::ClearFilters),
        4 => Ok(SessionAction::List),
        5 => match select_prospect(store)? {
            Some(name) => Ok(SessionAction::Show(name)),
            None => Ok(SessionAction::List),
        },
        6 => match select_prospect(store)? {
            Some(name) => prompt_annotation(store, name),
            None => Ok(SessionAction::List),
        },
        7 => {
            let formats = [ExportFormat::Csv, ExportFormat::Excel, ExportFormat::Json];
            let labels: Vec<String> = formats.iter().map(|f| f.to_string()).collect();
            let index = select("出力形式", &labels, 0)?;
            Ok(SessionAction::Export(formats[index]))
        }
        _ => Ok(SessionAction::Quit),
    }
}

/// 現在のビューから見込み客を選択（ビューが空なら None）
fn select_prospect(store: &RecordStore) -> Result<Option<String>> {
    let names: Vec<String> = store
        .current_view()
        .iter()
        .map(|r| r.name().to_string())
        .collect();

    if names.is_empty() {
        println!("  → 該当する見込み客がありません\n");
        return Ok(None);
    }

    let index = select("見込み客を選択", &names, 0)?;
    Ok(names.into_iter().nth(index))
}

fn prompt_annotation(store: &RecordStore, name: String) -> Result<SessionAction> {
    let current = store.annotation(&name);
    let labels: Vec<&str> = Status::ALL.iter().map(|s| s.label()).collect();
    let default = Status::ALL
        .iter()
        .position(|s| *s == current.status)
        .unwrap_or(0);

    let status = Status::ALL[select("ステータス", &labels, default)?];

    let notes: String = Input::new()
        .with_prompt("メモ")
        .with_initial_text(current.notes)
        .allow_empty(true)
        .interact_text()
        .map_err(cli_error)?;

    Ok(SessionAction::Annotate { name, status, notes })
}

/// 絞り込み値を選択（先頭の「すべて」で解除）
fn select_filter(label: &str, values: Vec<String>) -> Result<Option<String>> {
    let mut items = vec![ALL_LABEL.to_string()];
    items.extend(values);

    let index = select(label, &items, 0)?;
    Ok(if index == 0 { None } else { items.into_iter().nth(index) })
}

fn select<T: ToString>(prompt: &str, items: &[T], default: usize) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(cli_error)
}

fn cli_error(e: dialoguer::Error) -> ProspectError {
    ProspectError::CliExecution(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store() -> RecordStore {
        prospect_common::sample::load().unwrap()
    }

    #[test]
    fn test_apply_filters() {
        let mut store = store();
        let config = Config::default();

        apply_action(&mut store, SessionAction::LocationFilter(Some("Preston".into())), &config).unwrap();
        assert_eq!(store.current_view().len(), 2);

        apply_action(&mut store, SessionAction::TypeFilter(Some("Funding Body".into())), &config).unwrap();
        let names: Vec<&str> = store.current_view().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Health Innovation North West Coast"]);

        apply_action(&mut store, SessionAction::ClearFilters, &config).unwrap();
        assert_eq!(store.current_view().len(), 25);
    }

    #[test]
    fn test_apply_annotate() {
        let mut store = store();
        let action = SessionAction::Annotate {
            name: "Peak AI".into(),
            status: Status::MeetingScheduled,
            notes: "Intro call booked".into(),
        };
        assert!(apply_action(&mut store, action, &Config::default()).unwrap());
        assert_eq!(store.annotation("Peak AI").status, Status::MeetingScheduled);
    }

    #[test]
    fn test_apply_annotate_unknown() {
        let mut store = store();
        let action = SessionAction::Annotate {
            name: "Nobody".into(),
            status: Status::Closed,
            notes: String::new(),
        };
        assert!(apply_action(&mut store, action, &Config::default()).is_err());
    }

    #[test]
    fn test_apply_show_unknown() {
        let mut store = store();
        let result = apply_action(&mut store, SessionAction::Show("Nobody".into()), &Config::default());
        assert!(matches!(result, Err(ProspectError::ProspectNotFound(_))));
    }

    #[test]
    fn test_apply_export_uses_config_dir() {
        let dir = tempdir().unwrap();
        let config = Config {
            export_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let mut store = store();
        store.set_search("museum");

        apply_action(&mut store, SessionAction::Export(ExportFormat::Csv), &config).unwrap();

        let content = std::fs::read_to_string(dir.path().join("prospects_export.csv")).unwrap();
        assert_eq!(content.lines().count(), 5);
    }

    #[test]
    fn test_dispatch_export_failure_keeps_annotations() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "x").unwrap();
        let config = Config {
            export_dir: blocker.join("exports"),
            ..Config::default()
        };
        let mut store = store();

        let annotate = SessionAction::Annotate {
            name: "Peak AI".into(),
            status: Status::ProposalSent,
            notes: "Deck sent".into(),
        };
        assert!(dispatch(&mut store, annotate, &config).unwrap());

        assert!(apply_action(&mut store, SessionAction::Export(ExportFormat::Csv), &config).is_err());
        assert!(dispatch(&mut store, SessionAction::Export(ExportFormat::Csv), &config).unwrap());

        let annotate = SessionAction::Annotate {
            name: "The Lowry".into(),
            status: Status::Contacted,
            notes: String::new(),
        };
        assert!(dispatch(&mut store, annotate, &config).unwrap());

        assert_eq!(store.annotation("Peak AI").status, Status::ProposalSent);
        assert_eq!(store.annotation("Peak AI").notes, "Deck sent");
        assert_eq!(store.annotation("The Lowry").status, Status::Contacted);
    }

    #[test]
    fn test_dispatch_recovers_from_lookup_errors() {
        let mut store = store();
        let config = Config::default();
        assert!(dispatch(&mut store, SessionAction::Show("Nobody".into()), &config).unwrap());

        let action = SessionAction::Annotate {
            name: "Nobody".into(),
            status: Status::Closed,
            notes: String::new(),
        };
        assert!(dispatch(&mut store, action, &config).unwrap());
        assert!(!dispatch(&mut store, SessionAction::Quit, &config).unwrap());
    }

    #[test]
    fn test_apply_quit() {
        let mut store = store();
        assert!(!apply_action(&mut store, SessionAction::Quit, &Config::default()).unwrap());
    }

    #[test]
    fn test_run_session_unavailable_exits_cleanly() {
        let state = LoadState::Unavailable("missing.csv".into());
        assert!(run_session(state, &Config::default()).is_ok());
    }
}
