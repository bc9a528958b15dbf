use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use subwatch_cli::config::BASE_URL_ENV;
use subwatch_cli::{logger, report, run, Cli, FileConfig, Settings};
use subwatch_core::ui::TracingAlertSink;
use subwatch_core::SubscriptionApi;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let file = cli.config.as_deref().map(FileConfig::load).transpose()?;
    let env = std::env::var(BASE_URL_ENV).ok();
    let settings = Settings::resolve(cli.base_url.as_deref(), env.as_deref(), file.as_ref());
    tracing::debug!(base_url = %settings.base_url, "resolved settings");

    let api = SubscriptionApi::new(&settings.base_url);
    let outcome = run(&api, &cli.command).await;
    let status = report(outcome, &mut std::io::stdout().lock(), &TracingAlertSink);
    Ok(ExitCode::from(status))
}
