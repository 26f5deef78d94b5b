mod api;
mod config;
mod ledger;
mod logging;
mod models;
mod notify;
mod run;
mod ui;

use anyhow::{Context, Result};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if run::handle_offline(&args) {
        return Ok(());
    }

    let config = config::Config::from_env()
        .context("Backend not configured (set TXTRACK_API_URL and TXTRACK_API_KEY)")?;
    let log_path = logging::init(&logging::data_dir()?, &config.log_filter)?;
    info!(endpoint = %config.api_url, log = %log_path.display(), "starting txtrack");

    let client = api::GraphqlClient::new(config.api_url.clone(), &config.api_key)?;
    let mut controller = ledger::Controller::new(client);

    match args.len() {
        1 => run::as_tui(&mut controller, &config.api_url).await,
        _ => run::as_cli(&args, &mut controller).await,
    }
}
