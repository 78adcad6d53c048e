//! TopicVault: research-topic registry with duplicate detection.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use topicvault_core::TopicVaultConfig;
use topicvault_infer::{create_embedder, Vocabulary};
use topicvault_ingest::{validate_topic, TopicIngester};
use topicvault_server::{build_router, AppState};
use topicvault_store::SqliteStore;

fn resolve_data_dir() -> PathBuf {
    std::env::var("TOPICVAULT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()));
            if let Some(dir) = exe_dir {
                let parent_data = dir.join("../data");
                if parent_data.exists() {
                    return parent_data;
                }
            }
            PathBuf::from("data")
        })
}

fn print_help() {
    println!("TopicVault - research topic registry with duplicate detection");
    println!();
    println!("Usage: topicvault [command]");
    println!();
    println!("Commands:");
    println!("  (none)                   Start the server");
    println!("  check <title...>         Validate a topic title");
    println!("  backfill [data-dir]      Embed stored topics that have no embedding");
    println!("  help                     Show this help message");
}

fn run_check(title: &str) -> i32 {
    match validate_topic(title) {
        Ok(()) => {
            println!("valid: {}", title.trim());
            0
        }
        Err(rejection) => {
            println!("rejected: {}", rejection);
            1
        }
    }
}

fn run_backfill(data_dir: PathBuf) -> anyhow::Result<()> {
    let config = TopicVaultConfig::from_env(&data_dir)?;
    let store = SqliteStore::open(&config.data_paths.db)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))?;
    let embedder = create_embedder(Arc::new(Vocabulary::default()));

    let written = TopicIngester::new(&store, embedder.as_ref()).backfill(usize::MAX)?;
    println!(
        "Backfilled {} topics ({} total)",
        written,
        store.count_topics()?
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "check" => {
                if args.len() < 3 {
                    eprintln!("Usage: topicvault check <title...>");
                    std::process::exit(1);
                }
                std::process::exit(run_check(&args[2..].join(" ")));
            }
            "backfill" => {
                let data_dir = if args.len() > 2 {
                    PathBuf::from(&args[2])
                } else {
                    resolve_data_dir()
                };
                return run_backfill(data_dir);
            }
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!(
                    "Unknown command: {}. Use 'topicvault help' for usage.",
                    args[1]
                );
                std::process::exit(1);
            }
        }
    }

    let config = TopicVaultConfig::from_env(resolve_data_dir())?;
    info!("Data directory: {}", config.data_paths.root.display());
    let port = config.port;
    if config.persist_backfill {
        info!("Search will persist embeddings computed for legacy topics");
    }

    let store = SqliteStore::open(&config.data_paths.db)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))?;
    let embedder = create_embedder(Arc::new(Vocabulary::default()));

    let state = Arc::new(AppState::new(config, store, embedder));
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("TopicVault server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
