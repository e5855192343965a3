use clap::{Args, Parser, Subcommand};
use prospect_common::RecordStore;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prospect")]
#[command(about = "見込み客リストの検索・絞り込み・メモ・エクスポート", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// CSVデータのパスまたはURL（設定ファイルより優先）
    #[arg(long, global = true)]
    pub source: Option<String>,
}

/// 検索・絞り込み条件
#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// 検索語（名前・種別・所在地・概要・AI提案の部分一致）
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// 種別で絞り込み（完全一致）
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,

    /// 所在地で絞り込み（完全一致）
    #[arg(short, long)]
    pub location: Option<String>,
}

impl FilterArgs {
    /// ストアに条件を設定
    pub fn apply(&self, store: &mut RecordStore) {
        store.set_search(&self.search);
        store.set_type_filter(self.kind.as_deref());
        store.set_location_filter(self.location.as_deref());
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 見込み客を一覧表示
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 見込み客の詳細を表示
    Show {
        /// 見込み客の名前
        #[arg(required = true)]
        name: String,
    },

    /// 集計を表示
    Stats {
        /// 所在地の表示件数
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// 所在地の一覧を表示
    Locations,

    /// 絞り込み結果をエクスポート
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// 出力形式 (csv/excel/json、省略時は設定値)
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// 出力ファイル/ディレクトリ（省略時は設定の出力先）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 対話モード（検索・絞り込み・メモ入力・エクスポート）
    Session,

    /// 設定を表示/編集
    Config {
        /// データソースを設定
        #[arg(long)]
        set_source: Option<String>,

        /// 出力先ディレクトリを設定
        #[arg(long)]
        set_export_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, excel, or json", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("xlsx".parse::<ExportFormat>(), Ok(ExportFormat::Excel));
        assert_eq!("json".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::try_parse_from([
            "prospect", "list", "-s", "museum", "--type", "Cultural Institution", "-l", "Liverpool",
        ])
        .unwrap();

        match cli.command {
            Commands::List { filter, json } => {
                assert_eq!(filter.search, "museum");
                assert_eq!(filter.kind.as_deref(), Some("Cultural Institution"));
                assert_eq!(filter.location.as_deref(), Some("Liverpool"));
                assert!(!json);
            }
            _ => panic!("Expected List"),
        }
    }

    #[test]
    fn test_filter_args_apply() {
        let mut store = prospect_common::sample::load().unwrap();
        let filter = FilterArgs {
            search: "museum".into(),
            kind: None,
            location: Some("Liverpool".into()),
        };
        filter.apply(&mut store);
        let names: Vec<&str> = store.current_view().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["National Museums Liverpool"]);
    }
}
