use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tdas_chat::ChatOrchestrator;
use tdas_context::{report, Session};
use tdas_models::TdasConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "tdas",
    about = "Trading Data Assistant - chat with your trades and holdings CSVs"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/tdas.toml")]
    config: String,

    /// Trades CSV to load at startup
    #[arg(long)]
    trades: Option<String>,

    /// Holdings CSV to load at startup
    #[arg(long)]
    holdings: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    // The API key is the one fatal startup requirement: refuse to serve
    // any interaction without it.
    let api_key = tdas::load_api_key(&config)
        .context("API key not found - set the configured environment variable and restart")?;
    let orchestrator = tdas::build_orchestrator(&config, api_key);

    let mut session = Session::new();

    if let Some(path) = cli.trades.as_deref().or(config.data.trades_path.as_deref()) {
        load_trades(&mut session, path);
    }
    if let Some(path) = cli
        .holdings
        .as_deref()
        .or(config.data.holdings_path.as_deref())
    {
        load_holdings(&mut session, path);
    }

    println!("Trading Data Assistant - ask a question, or :help for commands.");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            ":quit" | ":q" => break,
            ":help" => print_help(),
            ":stats" => print_stats(&session),
            ":summary" => println!("{}", session.context()),
            ":clear" => {
                session.clear_history();
                println!("Conversation cleared.");
            }
            ":funds" => {
                ask(
                    &orchestrator,
                    &mut session,
                    "How many holdings does each fund have?",
                )
                .await
            }
            ":best" => {
                ask(
                    &orchestrator,
                    &mut session,
                    "Which fund has the best YTD profit and loss?",
                )
                .await
            }
            ":portfolios" => {
                ask(&orchestrator, &mut session, "List all unique portfolio names").await
            }
            _ if line.starts_with(":load ") => {
                let rest = line[":load ".len()..].trim();
                match rest.split_once(char::is_whitespace) {
                    Some(("trades", path)) => load_trades(&mut session, path.trim()),
                    Some(("holdings", path)) => load_holdings(&mut session, path.trim()),
                    _ => println!("Usage: :load trades <path> | :load holdings <path>"),
                }
            }
            _ if line.starts_with(':') => {
                println!("Unknown command: {line} (:help for commands)");
            }
            question => ask(&orchestrator, &mut session, question).await,
        }
    }

    Ok(())
}

fn load_config(path: &str) -> Result<TdasConfig> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            toml::from_str(&text).with_context(|| format!("Failed to parse config: {path}"))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path, "No config file found, using defaults");
            Ok(TdasConfig::default())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read config: {path}")),
    }
}

/// Send one question through the orchestrator and print the reply. The
/// exchange enters the transcript only when the endpoint answered.
async fn ask(orchestrator: &ChatOrchestrator, session: &mut Session, question: &str) {
    let response = orchestrator
        .respond(session.history(), session.context(), question)
        .await;

    println!("{}", response.text);
    if response.answered {
        session.record_exchange(question, response.text);
    }
}

fn load_trades(session: &mut Session, path: &str) {
    match tdas_loader::read_path(path) {
        Ok(table) => {
            println!("Trades loaded: {} records", table.len());
            session.set_trades(table);
        }
        Err(e) => {
            warn!(error = %e, path, "Failed to load trades CSV");
            println!("Error loading {path}: {e}");
        }
    }
}

fn load_holdings(session: &mut Session, path: &str) {
    match tdas_loader::read_path(path) {
        Ok(table) => {
            println!("Holdings loaded: {} records", table.len());
            session.set_holdings(table);
        }
        Err(e) => {
            warn!(error = %e, path, "Failed to load holdings CSV");
            println!("Error loading {path}: {e}");
        }
    }
}

fn print_stats(session: &Session) {
    let stats = session.stats();
    println!("Trades loaded:       {}", stats.trade_rows);
    println!("Holdings loaded:     {}", stats.holding_rows);
    println!("Unique funds:        {}", stats.unique_funds);
    if let Some(total) = stats.total_pl_ytd {
        println!("Total PL_YTD:        ${}", report::format_amount(total));
    }
    println!("Conversation length: {}", stats.exchanges);
    println!(
        "Status:              {}",
        if session.has_data() {
            "Ready"
        } else {
            "Waiting for data"
        }
    );
}

fn print_help() {
    println!(":load trades <path>    load a trades CSV");
    println!(":load holdings <path>  load a holdings CSV");
    println!(":stats                 show loaded data and conversation stats");
    println!(":summary               print the current data summary");
    println!(":funds                 ask: how many holdings does each fund have?");
    println!(":best                  ask: which fund has the best YTD profit and loss?");
    println!(":portfolios            ask: list all unique portfolio names");
    println!(":clear                 clear the conversation");
    println!(":quit                  exit");
    println!("Anything else is sent to the assistant as a question.");
}
