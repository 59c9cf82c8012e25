#![doc = include_str!("../README.md")]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::connect_info::IntoMakeServiceWithConnectInfo;
use axum::extract::ConnectInfo;
use axum::{routing, Router};
use tokio::net::TcpListener;
use tokio::signal;

mod error;
pub use error::{Error, Result};

mod config;
pub use config::{Config, DataConfig};

#[cfg(test)]
mod testing;

pub(crate) mod middleware;

pub mod source;
pub use source::DataSource;

pub mod scoring;
pub use scoring::{Curve, Scoring};

pub mod bans;
pub mod list;
pub mod leaderboard;

use leaderboard::LeaderboardService;
use list::ListService;

#[allow(clippy::missing_docs_in_private_items)]
type Server = axum::serve::Serve<
	IntoMakeServiceWithConnectInfo<Router, SocketAddr>,
	axum::middleware::AddExtension<Router, ConnectInfo<SocketAddr>>,
>;

/// Run the API.
///
/// This function will not exit until a SIGINT signal is received.
/// If you want to supply a custom signal for graceful shutdown, use [`run_until()`] instead.
pub async fn run(config: Config) -> anyhow::Result<()> {
	server(config)
		.await
		.context("build http server")?
		.with_graceful_shutdown(sigint())
		.await
		.context("run http server")
}

/// Run the API until a given future completes.
///
/// This function is the same as [`run()`], except that it also waits for the provided `until`
/// future, and shuts down the server when that future resolves.
pub async fn run_until<Until>(config: Config, until: Until) -> anyhow::Result<()>
where
	Until: Future<Output = ()> + Send + 'static,
{
	server(config)
		.await
		.context("build http server")?
		.with_graceful_shutdown(async move {
			tokio::select! {
				() = until => {}
				() = sigint() => {}
			}
		})
		.await
		.context("run http server")
}

/// Builds the API's routes on top of the given data source and scoring curve.
pub fn router(source: DataSource, scoring: Arc<dyn Scoring>) -> Router {
	let list_svc = ListService::new(source.clone());
	let leaderboard_svc = LeaderboardService::new(source, scoring);

	Router::new()
		.route("/", routing::get(|| async { "demonlist api" }))
		.merge(Router::from(list_svc))
		.nest("/leaderboard", Router::from(leaderboard_svc))
		.layer(middleware::logging::layer!())
}

/// Runs the necessary setup for the API and returns a future that will run the server when polled.
///
/// See [`run()`] and [`run_until()`].
async fn server(config: Config) -> anyhow::Result<Server> {
	tracing::debug!(addr = %config.addr, "establishing TCP connection");

	let tcp_listener = TcpListener::bind(config.addr)
		.await
		.context("bind tcp socket")?;

	let addr = tcp_listener.local_addr().context("get tcp addr")?;
	let source = config.data_source().context("initialize data source")?;

	tracing::info!(%addr, ?source, prod = cfg!(feature = "production"), "listening for requests");

	let api_service = router(source, Arc::new(Curve::default()))
		.into_make_service_with_connect_info::<SocketAddr>();

	Ok(axum::serve(tcp_listener, api_service))
}

/// Waits for a SIGINT signal from the operating system.
#[tracing::instrument(name = "runtime::signals")]
async fn sigint() {
	let signal_result = signal::ctrl_c().await;

	if let Err(error) = signal_result {
		tracing::error!("failed to receive SIGINT: {error}");
	} else {
		tracing::warn!("received SIGINT; shutting down...");
	}
}
