use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use subwatch_core::ui::{show_alert, AlertLevel, AlertSink};
use subwatch_core::{SubscriptionApi, Transport};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "subwatch", version, about = "Manage subscriptions through the monitor API")]
pub struct Cli {
    /// TOML file with a `base_url` key
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API root, e.g. http://127.0.0.1:3000
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List all subscriptions
    List,
    /// Create a subscription from a JSON object
    Create { payload: String },
    /// Replace fields of a subscription with those of a JSON object
    Update { id: String, payload: String },
    /// Delete a subscription
    Delete { id: String },
    /// Run a status check on a subscription now
    Check { id: String },
}

/// Run one command and return the server's JSON reply untouched.
pub async fn run<T: Transport>(api: &SubscriptionApi<T>, command: &Command) -> Result<Value> {
    debug!(?command, base_url = api.client().base_url(), "running command");
    let value = match command {
        Command::List => api.list().await?,
        Command::Create { payload } => api.create(&parse_payload(payload)?).await?,
        Command::Update { id, payload } => api.update(id, &parse_payload(payload)?).await?,
        Command::Delete { id } => api.delete(id).await?,
        Command::Check { id } => api.check(id).await?,
    };
    Ok(value)
}

/// Print a successful reply as pretty JSON to `out`, or raise a failure once
/// through `sink`. Returns the process exit status.
pub fn report<W: Write, S: AlertSink + ?Sized>(outcome: Result<Value>, out: &mut W, sink: &S) -> u8 {
    let written = outcome.and_then(|value| {
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        Ok(())
    });
    match written {
        Ok(()) => 0,
        Err(e) => {
            show_alert(sink, &format!("{e:#}"), AlertLevel::Error);
            1
        }
    }
}

fn parse_payload(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("payload is not valid JSON: {raw}"))
}
