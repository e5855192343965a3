use clap::Parser;
use prospect_tracker::{cli, config, error, export, loader, render, session};
use cli::{Cli, Commands};
use config::Config;
use error::{ProspectError, Result};
use loader::{DataSource, LoadState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load()?;

    if let Commands::Config { set_source, set_export_dir, show } = cli.command {
        if let Some(source) = set_source {
            config.set_source(source)?;
            println!("✔ データソースを設定しました");
        }

        if let Some(dir) = set_export_dir {
            config.set_export_dir(dir)?;
            println!("✔ 出力先を設定しました");
        }

        if show {
            println!("設定:");
            println!("  データソース: {}", config.data_source.as_deref().unwrap_or("(組み込みサンプル)"));
            println!("  出力先: {}", config.export_dir.display());
            println!("  出力形式: {}", config.default_export_format);
            println!("  タイトル: {}", config.export_title);
        }
        return Ok(());
    }

    // データ読み込み（起動時に1回）
    let source = DataSource::from_setting(config.resolve_source(cli.source.as_deref()).as_deref());
    let state = loader::load(&source).await;

    if let Commands::Session = cli.command {
        return session::run_session(state, &config);
    }

    let mut store = match state {
        LoadState::Ready(store) => store,
        LoadState::Unavailable(reason) => {
            println!("⚠ データを読み込めません ({})", source);
            return Err(ProspectError::DataUnavailable(reason));
        }
    };

    match cli.command {
        Commands::List { filter, json } => {
            filter.apply(&mut store);
            let view = store.current_view();

            if json {
                let exported = export::json::to_exported(&store, &view);
                println!("{}", serde_json::to_string_pretty(&exported)?);
            } else {
                print!("{}", render::render_table(&store, &view));
            }
        }

        Commands::Show { name } => {
            let record = store
                .find(&name)
                .ok_or_else(|| ProspectError::ProspectNotFound(name.clone()))?;
            print!("{}", render::render_detail(&store, record));
        }

        Commands::Stats { top } => {
            print!("{}", render::render_stats(&store, top));
        }

        Commands::Locations => {
            for location in store.distinct_locations() {
                println!("{}", location);
            }
        }

        Commands::Export { filter, format, output } => {
            println!("📄 prospect - エクスポート\n");

            filter.apply(&mut store);
            let view = store.current_view();

            let format = match format {
                Some(format) => format,
                None => config
                    .default_export_format
                    .parse()
                    .map_err(ProspectError::Config)?,
            };
            let output_dir = output.unwrap_or_else(|| config.export_dir.clone());

            export::export_view(&store, &view, format, &output_dir, &config.export_title)?;

            println!("\n✅ エクスポート完了");
        }

        Commands::Session | Commands::Config { .. } => {}
    }

    Ok(())
}

/// ログ初期化（RUST_LOG 優先、未設定なら warn / --verbose で debug）
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
