//! relay-worker: read an SNS envelope, render, and post to Slack.
//!
//! Reads one `{"Records":[{"Sns":{...}}]}` document, classifies and
//! renders each record, resolves channels through the configured map,
//! and posts the payloads to the incoming webhook. `--dry-run` prints
//! the payloads instead.

use std::fs;
use std::io::Read;

use clap::Parser;
use tracing::info;

use relay_core::{config, RelayConfig, SnsEnvelope};
use relay_notify::{process_batch, Notifier, SlackWebhook};

/// Render SNS notification records and post them to a Slack webhook.
#[derive(Parser, Debug)]
#[command(name = "relay-worker", version, about)]
struct Cli {
    /// Path to an SNS envelope JSON document; `-` reads stdin.
    #[arg(long, default_value = "-")]
    event: String,

    /// Print rendered payloads instead of posting them.
    #[arg(long)]
    dry_run: bool,
}

fn read_event(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read_to_string(source)?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    config::load_dotenv();
    let config = RelayConfig::from_env()?;
    config.log_summary();

    let raw = read_event(&cli.event)?;
    let envelope: SnsEnvelope = serde_json::from_str(&raw)?;
    let records = envelope.into_records();
    info!(records = records.len(), "envelope parsed");

    let output = process_batch(&records, &config);

    if cli.dry_run {
        for message in &output.messages {
            let payload = message.clone().into_payload(&config);
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        if !output.failures.is_empty() {
            anyhow::bail!("{} record(s) failed to process", output.failures.len());
        }
        return Ok(());
    }

    let url = config
        .webhook_url
        .clone()
        .ok_or_else(|| anyhow::anyhow!("WEBHOOK_URL is not set"))?;
    let webhook = SlackWebhook::new(url);

    let mut delivered = 0usize;
    let mut delivery_failures = 0usize;
    for message in &output.messages {
        let payload = message.clone().into_payload(&config);
        match webhook.send(&payload).await {
            Ok(()) => delivered += 1,
            Err(error) => {
                tracing::warn!(
                    channel = %payload.channel,
                    error = %error,
                    "delivery failed"
                );
                delivery_failures += 1;
            }
        }
    }

    info!(
        delivered,
        record_failures = output.failures.len(),
        delivery_failures,
        "batch complete"
    );

    if !output.failures.is_empty() || delivery_failures > 0 {
        anyhow::bail!(
            "{} record failure(s), {} delivery failure(s)",
            output.failures.len(),
            delivery_failures
        );
    }
    Ok(())
}
