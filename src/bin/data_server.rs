//! Flat in-memory data store.
//!
//! Loads the listing dataset once at startup and serves it read-only over
//! the raw wire protocol: `RAW_LIST` returns everything, `RAW_SEARCH` filters
//! by exact city and price ceiling. Applies no ranking; ordering is the
//! gateway's job.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use listing_gateway::data::types::Listing;

const DEFAULT_BIND: &str = "127.0.0.1:49963";
const DEFAULT_LISTINGS: &str = "listings.json";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut bind_addr: SocketAddr = DEFAULT_BIND.parse()?;
    let mut listings_path = DEFAULT_LISTINGS.to_string();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = args[i + 1].parse()?;
                i += 2;
            }
            "--listings" => {
                listings_path = args[i + 1].clone();
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let text = std::fs::read_to_string(&listings_path)
        .with_context(|| format!("could not read {}", listings_path))?;
    let listings: Arc<Vec<Listing>> = Arc::new(
        serde_json::from_str(&text)
            .with_context(|| format!("could not parse {}", listings_path))?,
    );

    let listener = TcpListener::bind(bind_addr).await?;
    info!(
        "data server listening on {} ({} listings loaded from {})",
        bind_addr,
        listings.len(),
        listings_path
    );

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let listings = listings.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_conn(stream, peer, listings).await {
                        warn!("connection {} ended with error: {}", peer, e);
                    }
                });
            }
            Err(e) => warn!("accept failed: {}", e),
        }
    }
}

async fn handle_conn(
    stream: TcpStream,
    peer: SocketAddr,
    listings: Arc<Vec<Listing>>,
) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(raw_line) = lines.next_line().await? {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        info!("DATA {} -> {}", peer, line);

        let mut tokens = line.split_whitespace();
        let reply = match tokens.next() {
            Some("RAW_LIST") => render_records(listings.iter()),
            Some("RAW_SEARCH") => match parse_filter(tokens) {
                Ok((city, max_price)) => render_records(
                    listings
                        .iter()
                        .filter(|l| l.city == city && l.price as i64 <= max_price),
                ),
                Err(reason) => format!("ERROR {}\nEND\n", reason),
            },
            _ => "ERROR unknown command (use RAW_LIST or RAW_SEARCH)\nEND\n".to_string(),
        };

        writer.write_all(reply.as_bytes()).await?;
    }

    Ok(())
}

/// Pulls `city` and `max_price` out of the remaining request tokens.
fn parse_filter<'a>(tokens: impl Iterator<Item = &'a str>) -> Result<(String, i64), String> {
    let mut city: Option<&str> = None;
    let mut max_price: Option<&str> = None;

    for token in tokens {
        let Some((key, value)) = token.split_once('=') else {
            return Err(format!("malformed field: {}", token));
        };
        match key {
            "city" => city = Some(value),
            "max_price" => max_price = Some(value),
            _ => {}
        }
    }

    let (Some(city), Some(max_price)) = (city, max_price) else {
        return Err("RAW_SEARCH requires city and max_price".to_string());
    };
    let max_price: i64 = max_price
        .parse()
        .map_err(|_| "max_price must be an integer".to_string())?;

    Ok((city.to_string(), max_price))
}

/// `OK RESULT <n>` framing with one delimiter-wrapped record per line.
fn render_records<'a>(matches: impl Iterator<Item = &'a Listing>) -> String {
    let mut lines = Vec::new();
    for l in matches {
        lines.push(format!(
            "id=<{}>;city=<{}>;address=<{}>;price=<{}>;bedrooms=<{}>",
            l.id, l.city, l.address, l.price, l.bedrooms
        ));
    }

    let mut out = format!("OK RESULT {}\n", lines.len());
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str("END\n");
    out
}
