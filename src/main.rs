use std::io::Write;

use anyhow::Context;
use clap::Parser;
use config::Config;
use cvss_parser::DEFAULT_DELIMITER;
use entity::HighestResult;
use report::{Format, JsonReport, TextReport};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use usecase::{highest_from_text, NvdClient, NVD_API_URL, REQUEST_DELAY, REQUEST_TIMEOUT};

mod config;
mod entity;
mod report;
mod usecase;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    ///CVE identifiers. When omitted they are read from an interactive prompt
    identifiers: Vec<String>,
    ///NVD API key, sent as the "apiKey" header
    #[arg(long, env = "NVD_API_KEY", hide_env_values = true)]
    api_key: String,
    ///NVD CVE API endpoint
    #[arg(long, env = "NVD_API_URL", default_value = NVD_API_URL)]
    endpoint: String,
    ///separator between identifiers; whitespace and CJK commas are folded into it
    #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
    delimiter: char,
    ///pause after every request, in milliseconds
    #[arg(long, default_value_t = REQUEST_DELAY.as_millis() as u64)]
    delay_ms: u64,
    ///per-request timeout, in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT.as_secs())]
    timeout_secs: u64,
    ///"text" for a console report or "json" for a single JSON document
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

/// Print a prompt and read lines until one is not blank. EOF yields "".
async fn prompt_identifiers(prompt_out: &mut dyn Write) -> anyhow::Result<String> {
    writeln!(
        prompt_out,
        "Enter CVE identifiers separated by commas, spaces or newlines:"
    )?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(prompt_out, "> ")?;
        prompt_out.flush()?;
        match lines.next_line().await.context("failed to read stdin")? {
            Some(line) if !line.trim().is_empty() => return Ok(line),
            Some(_) => continue,
            None => return Ok(String::new()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    //logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = Config::try_from(&args)?;
    let client = NvdClient::new(config.endpoint.clone(), config.api_key.clone(), config.timeout)
        .context("failed to build HTTP client")?;

    let text = if args.identifiers.is_empty() {
        // keep stdout clean for the JSON document
        match config.format {
            Format::Text => prompt_identifiers(&mut std::io::stdout()).await?,
            Format::Json => prompt_identifiers(&mut std::io::stderr()).await?,
        }
    } else {
        args.identifiers.join(&config.delimiter.to_string())
    };

    let stdout = std::io::stdout();
    let highest = match config.format {
        Format::Text => {
            let mut report = TextReport::new(stdout.lock());
            highest_from_text(&text, config.delimiter, &client, config.delay, &mut report).await
        }
        Format::Json => {
            let mut report = JsonReport::new(stdout.lock());
            highest_from_text(&text, config.delimiter, &client, config.delay, &mut report).await
        }
    }
    .context("failed to write report")?;

    match highest.map(HighestResult::into_tuple) {
        Some((identifier, score, vector)) => {
            debug!("highest: {} {} {:?}", identifier, score, vector)
        }
        None => info!("no valid score found"),
    }
    Ok(())
}
