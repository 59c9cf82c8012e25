//! Trace capturing facilities.

use std::io;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "demonlist_api=info,warn";

/// Initializes [`tracing-subscriber`].
///
/// NOTE: the returned [`WorkerGuard`] flushes buffered logs when dropped, which means it has to
/// stay alive until the program exits!
///
/// [`tracing-subscriber`]: tracing_subscriber
pub fn init() -> anyhow::Result<WorkerGuard> {
	let (writer, guard) = tracing_appender::non_blocking(io::stderr());
	let filter = match EnvFilter::try_from_default_env() {
		Ok(filter) => filter,
		Err(_) => EnvFilter::try_new(DEFAULT_FILTER).context("parse default log filter")?,
	};

	tracing_subscriber::fmt()
		.pretty()
		.with_ansi(cfg!(not(feature = "production")))
		.with_file(true)
		.with_level(true)
		.with_line_number(true)
		.with_span_events(FmtSpan::CLOSE)
		.with_target(true)
		.with_thread_names(true)
		.with_writer(writer)
		.with_env_filter(filter)
		.try_init()
		.map_err(|error| anyhow::anyhow!(error))
		.context("install global subscriber")?;

	tracing::debug!("initialized tracing");

	Ok(guard)
}
