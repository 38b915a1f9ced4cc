use std::net::SocketAddr;
use std::sync::Arc;

use listing_gateway::cache::lru::ResponseCache;
use listing_gateway::gateway::session::{run_gateway, GatewayContext};

const DEFAULT_BIND: &str = "127.0.0.1:8001";
const DEFAULT_DATA: &str = "127.0.0.1:49963";
const DEFAULT_CACHE_MAX_ITEMS: usize = 20;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut bind_addr: SocketAddr = DEFAULT_BIND.parse()?;
    let mut data_addr: SocketAddr = DEFAULT_DATA.parse()?;
    let mut cache_max_items = DEFAULT_CACHE_MAX_ITEMS;
    let mut cache_enabled = true;
    let mut log_file: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = args[i + 1].parse()?;
                i += 2;
            }
            "--data" => {
                data_addr = args[i + 1].parse()?;
                i += 2;
            }
            "--cache-size" => {
                cache_max_items = args[i + 1].parse()?;
                i += 2;
            }
            "--no-cache" => {
                cache_enabled = false;
                i += 1;
            }
            "--log-file" => {
                log_file = Some(args[i + 1].clone());
                i += 2;
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: {} [--bind <addr:port>] [--data <addr:port>] \
                     [--cache-size <n>] [--no-cache] [--log-file <path>]",
                    args[0]
                );
                std::process::exit(0);
            }
            _ => {
                i += 1;
            }
        }
    }

    // 1. Logging: stdout by default, or an append-only file.
    match &log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_max_level(tracing::Level::INFO)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(tracing::Level::INFO)
                .init();
        }
    }

    // 2. Shared response cache:
    let cache = if cache_enabled {
        Some(Arc::new(ResponseCache::new(cache_max_items)))
    } else {
        None
    };

    let ctx = Arc::new(GatewayContext { data_addr, cache });

    // 3. Accept loop:
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(
        "=== gateway starting on {}, DATA={}, CACHE_ENABLED={} (max {} items) ===",
        bind_addr,
        data_addr,
        cache_enabled,
        cache_max_items
    );

    run_gateway(listener, ctx).await;

    Ok(())
}
