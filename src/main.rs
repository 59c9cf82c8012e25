//! The demonlist API binary.

use anyhow::Context;
use demonlist_api::Config;

mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	if let Err(error) = dotenvy::dotenv() {
		eprintln!("WARN: Failed to load `.env` file: {error}");
	}

	let _guard = logging::init().context("initialize logging")?;
	let config = Config::new().context("load configuration")?;

	tracing::info!(?config, "starting up");

	if cfg!(not(feature = "production")) {
		tracing::warn!("running in development mode");
	}

	demonlist_api::run(config).await
}
