//! Interactive front end for the gateway.
//!
//! REPL mode sends `LIST`/`SEARCH`/`QUIT` commands and renders `OK` replies
//! as an aligned table; a `SEARCH` typed without fields falls back to
//! prompting for city and price. `--benchmark` replays the same `SEARCH`
//! fifty times over one connection and reports the mean latency, which makes
//! the gateway's cache effect visible.

use std::net::SocketAddr;
use std::time::Instant;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::net::TcpStream;

const DEFAULT_ADDR: &str = "127.0.0.1:8001";
const BENCHMARK_REQUESTS: usize = 50;
const BENCHMARK_COMMAND: &str = "SEARCH city=LongBeach max_price=3000";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut addr: SocketAddr = DEFAULT_ADDR.parse()?;
    let mut benchmark = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--addr" => {
                addr = args[i + 1].parse()?;
                i += 2;
            }
            "--benchmark" => {
                benchmark = true;
                i += 1;
            }
            _ => {
                i += 1;
            }
        }
    }

    if benchmark {
        run_benchmark(addr).await
    } else {
        run_repl(addr).await
    }
}

async fn run_repl(addr: SocketAddr) -> Result<()> {
    println!("Connecting to listing gateway at {}...", addr);
    let mut stream = match TcpStream::connect(addr).await {
        Ok(stream) => stream,
        Err(_) => {
            println!("Error: could not connect to the gateway.");
            return Ok(());
        }
    };

    println!("Welcome! commands: LIST, SEARCH, QUIT");

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let Some(line) = prompt(&mut input, ">> ").await? else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        if line.to_uppercase() == "QUIT" {
            stream.write_all(b"QUIT\n").await?;
            break;
        }

        // Bare SEARCH: ask for the fields interactively.
        let command = if line.to_uppercase().starts_with("SEARCH") && !line.contains('=') {
            let Some(city) = prompt(&mut input, "Enter City: ").await? else {
                break;
            };
            let Some(price) = prompt(&mut input, "Enter Max Price: ").await? else {
                break;
            };
            format!("SEARCH city={} max_price={}", city.trim(), price.trim())
        } else {
            line
        };

        let response = send_command(&mut stream, &command).await?;
        print_table(&response);
    }

    println!("Goodbye!");
    Ok(())
}

async fn run_benchmark(addr: SocketAddr) -> Result<()> {
    use std::io::Write;

    println!("--- Starting Benchmark ({} Requests) ---", BENCHMARK_REQUESTS);

    let mut stream = TcpStream::connect(addr).await?;
    let started = Instant::now();

    for _ in 0..BENCHMARK_REQUESTS {
        send_command(&mut stream, BENCHMARK_COMMAND).await?;
        print!(".");
        std::io::stdout().flush()?;
    }

    let total = started.elapsed();
    println!(
        "\n\nTotal Time: {:.4} seconds",
        total.as_secs_f64()
    );
    println!(
        "Average Time per Request: {:.4} seconds",
        total.as_secs_f64() / BENCHMARK_REQUESTS as f64
    );
    println!("----------------------------------------");
    Ok(())
}

/// Writes one command line and accumulates the reply until `END`.
async fn send_command(stream: &mut TcpStream, command: &str) -> Result<String> {
    stream.write_all(format!("{}\n", command).as_bytes()).await?;

    let mut response = String::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        response.push_str(&String::from_utf8_lossy(&chunk[..n]));
        if response.contains("END\n") {
            break;
        }
    }
    Ok(response)
}

async fn prompt(
    input: &mut Lines<BufReader<Stdin>>,
    text: &str,
) -> Result<Option<String>> {
    print!("{}", text);
    use std::io::Write;
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}

/// Renders an `OK` reply as an aligned table, or the error line as-is.
fn print_table(response: &str) {
    let mut lines = response.lines();
    let first = lines.next().unwrap_or("");
    if !first.starts_with("OK") {
        println!("Server Error: {}", first);
        return;
    }

    println!(
        "\n{:<5} {:<15} {:<25} {:<10} {:<5}",
        "ID", "City", "Address", "Price", "Beds"
    );
    println!("{}", "-".repeat(65));

    for line in lines {
        if !line.contains("id=") {
            continue;
        }
        let mut fields = std::collections::HashMap::new();
        for part in line.split(';') {
            if let Some((key, value)) = part.split_once('=') {
                fields.insert(key, value);
            }
        }
        println!(
            "{:<5} {:<15} {:<25} ${:<9} {:<5}",
            fields.get("id").copied().unwrap_or("?"),
            fields.get("city").copied().unwrap_or("?"),
            fields.get("address").copied().unwrap_or("?"),
            fields.get("price").copied().unwrap_or("?"),
            fields.get("bedrooms").copied().unwrap_or("?"),
        );
    }
    println!();
}
