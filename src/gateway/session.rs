use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use super::protocol::{ClientRequest, GatewayResponse};
use crate::cache::key::canonical_cache_key;
use crate::cache::lru::ResponseCache;
use crate::data::client::query_data_server;
use crate::data::parser::parse_response;
use crate::rank::rank_listings;

/// Everything a session needs beyond its own connection. The cache is the
/// only piece shared across sessions; `None` means caching is disabled.
pub struct GatewayContext {
    pub data_addr: SocketAddr,
    pub cache: Option<Arc<ResponseCache>>,
}

/// Accept loop: one spawned task per client connection.
///
/// Per-connection failures are logged and dropped; the loop itself never
/// terminates on them.
pub async fn run_gateway(listener: TcpListener, ctx: Arc<GatewayContext>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_session(stream, peer, ctx).await {
                        warn!("session {} ended with error: {}", peer, e);
                    }
                });
            }
            Err(e) => warn!("accept failed: {}", e),
        }
    }
}

/// Per-connection state machine.
///
/// Reads newline-terminated commands until the peer disconnects or sends
/// `QUIT`. Blank lines are skipped without a reply; every other line produces
/// exactly one outbound message. Dispatch order per line: verb check, cache
/// lookup, then full validation and the data-server round trip.
pub async fn handle_session(
    stream: TcpStream,
    peer: SocketAddr,
    ctx: Arc<GatewayContext>,
) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(raw_line) = lines.next_line().await? {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        info!("CLIENT {} -> {}", peer, line);

        let verb = line
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_uppercase();

        if verb == "QUIT" {
            let reply = GatewayResponse::Ok(Vec::new()).to_wire();
            writer.write_all(reply.as_bytes()).await?;
            log_reply(peer, &reply, false);
            return Ok(());
        }

        if verb != "LIST" && verb != "SEARCH" {
            let reply =
                GatewayResponse::Error("invalid command (use LIST, SEARCH, or QUIT)".to_string())
                    .to_wire();
            writer.write_all(reply.as_bytes()).await?;
            log_reply(peer, &reply, false);
            continue;
        }

        // Cache consult comes before validation: a hit is returned as-is with
        // no parsing and no data-server contact.
        let key = canonical_cache_key(line);
        if let Some(cache) = &ctx.cache {
            if let Some(cached) = cache.get(&key) {
                writer.write_all(cached.as_bytes()).await?;
                log_reply(peer, &cached, true);
                continue;
            }
        }

        let response = match ClientRequest::parse(line) {
            ClientRequest::List => fetch_and_rank(&ctx, "RAW_LIST".to_string()).await,
            ClientRequest::Search { city, max_price } => {
                let command = format!("RAW_SEARCH city={} max_price={}", city, max_price);
                fetch_and_rank(&ctx, command).await
            }
            ClientRequest::Invalid { reason } => GatewayResponse::Error(reason),
            // QUIT was dispatched above.
            ClientRequest::Quit => GatewayResponse::Ok(Vec::new()),
        };

        let reply = response.to_wire();

        if let Some(cache) = &ctx.cache {
            if response.is_ok() {
                cache.put(key, reply.clone());
            }
        }

        writer.write_all(reply.as_bytes()).await?;
        log_reply(peer, &reply, false);
    }

    Ok(())
}

/// Cache-miss pipeline: data-server round trip, parse, rank, wrap. All
/// failures come back as `Error` replies; nothing here can take down the
/// session.
async fn fetch_and_rank(ctx: &GatewayContext, command: String) -> GatewayResponse {
    let raw = match query_data_server(ctx.data_addr, &command).await {
        Ok(raw) => raw,
        Err(err) => return GatewayResponse::Error(err.to_string()),
    };

    match parse_response(&raw) {
        Ok(listings) => GatewayResponse::Ok(rank_listings(listings)),
        Err(err) => GatewayResponse::Error(err.to_string()),
    }
}

fn log_reply(peer: SocketAddr, reply: &str, cache_hit: bool) {
    let first = reply.lines().next().unwrap_or("");
    info!(
        "SERVER -> CLIENT {} (cache_hit={}) :: {}",
        peer, cache_hit, first
    );
}
