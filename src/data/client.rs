use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info};

use super::types::DataError;

/// How long a reply read may sit idle before the accumulated text is taken
/// as the full reply.
const READ_IDLE_TIMEOUT: Duration = Duration::from_millis(250);

const READ_CHUNK: usize = 4096;

/// Sends one command line to the data store and returns the raw reply text.
///
/// Opens a fresh connection, writes `request` terminated by a newline and
/// accumulates the reply until the `END` terminator is seen, the peer closes,
/// or a read goes idle for [`READ_IDLE_TIMEOUT`]. The returned text may be
/// empty; classification is the parser's job. Transport failures are mapped
/// to [`DataError::NoResponse`] instead of propagating.
pub async fn query_data_server(addr: SocketAddr, request: &str) -> Result<String, DataError> {
    let request = request.trim();

    let mut stream = TcpStream::connect(addr).await.map_err(|e| {
        debug!("connect to data server {} failed: {}", addr, e);
        DataError::NoResponse
    })?;

    stream
        .write_all(format!("{}\n", request).as_bytes())
        .await
        .map_err(|e| {
            debug!("write to data server {} failed: {}", addr, e);
            DataError::NoResponse
        })?;

    let raw = recv_until_end(&mut stream).await;
    let first = raw.lines().next().unwrap_or("");
    info!("APP -> DATA :: {} || DATA -> APP :: {}", request, first);

    Ok(raw)
}

/// Accumulates reply bytes until `END\n` (or `END\r\n`) shows up, the peer
/// closes the connection, or a single read stays idle past the timeout.
async fn recv_until_end(stream: &mut TcpStream) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        match tokio::time::timeout(READ_IDLE_TIMEOUT, stream.read(&mut chunk)).await {
            // Idle: whatever arrived so far is the reply.
            Err(_) => break,
            // Peer closed.
            Ok(Ok(0)) => break,
            Ok(Ok(n)) => {
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf);
                if text.contains("END\n") || text.contains("END\r\n") {
                    break;
                }
            }
            Ok(Err(e)) => {
                debug!("read from data server failed: {}", e);
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}
