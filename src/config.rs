//! Module containing the [`Config`] struct, the API's configuration.

use std::convert::Infallible;
use std::env;
use std::error::Error as StdError;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use derive_more::Debug;
use url::Url;

use crate::source::DataSource;

/// Configuration values for the API.
///
/// These are read from the environment on startup.
#[derive(Debug, Clone)]
pub struct Config {
	/// The ip address and port the API is going to listen on.
	#[debug("{addr}")]
	pub addr: SocketAddr,

	/// Where the list documents are loaded from.
	pub data: DataConfig,

	/// Maximum time a single document request may take.
	///
	/// Only applies to documents fetched over HTTP.
	pub fetch_timeout: Option<Duration>,
}

/// Location of the list documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataConfig {
	/// A URL documents are fetched from.
	#[debug("{}", _0.as_str())]
	Http(Url),

	/// A directory documents are read from.
	#[debug("{}", _0.display())]
	Directory(PathBuf),
}

impl FromStr for DataConfig {
	type Err = Infallible;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match Url::parse(value) {
			Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Self::Http(url)),
			_ => Ok(Self::Directory(PathBuf::from(value))),
		}
	}
}

impl Config {
	/// Creates a new [`Config`] object by reading from the environment.
	pub fn new() -> anyhow::Result<Self> {
		let ip_addr = parse_from_env("DEMONLIST_IP")?;
		let port = parse_from_env("DEMONLIST_PORT")?;
		let addr = SocketAddr::new(ip_addr, port);
		let data = parse_from_env("DEMONLIST_DATA")?;
		let fetch_timeout = parse_from_env_opt("DEMONLIST_FETCH_TIMEOUT")?.map(Duration::from_secs);

		Ok(Self {
			addr,
			data,
			fetch_timeout,
		})
	}

	/// Creates the [`DataSource`] described by this configuration.
	pub fn data_source(&self) -> anyhow::Result<DataSource> {
		match &self.data {
			DataConfig::Http(base_url) => {
				let mut client = reqwest::Client::builder();

				if let Some(timeout) = self.fetch_timeout {
					client = client.timeout(timeout);
				}

				let client = client.build().context("build http client")?;

				Ok(DataSource::http(client, base_url.clone()))
			}
			DataConfig::Directory(path) => Ok(DataSource::directory(path.clone())),
		}
	}
}

/// Parses an environment variable into a `T`.
fn parse_from_env<T>(var: &str) -> anyhow::Result<T>
where
	T: FromStr,
	T::Err: StdError + Send + Sync + 'static,
{
	let value = env::var(var).with_context(|| format!("missing `{var}` environment variable"))?;

	if value.is_empty() {
		anyhow::bail!("`{var}` cannot be empty");
	}

	<T as FromStr>::from_str(&value).with_context(|| format!("failed to parse `{var}`"))
}

/// Parses an environment variable into an `Option<T>`, returning `None` if the variable is not
/// set or empty.
fn parse_from_env_opt<T>(var: &str) -> anyhow::Result<Option<T>>
where
	T: FromStr,
	T::Err: StdError + Send + Sync + 'static,
{
	let Some(value) = env::var(var).ok() else {
		return Ok(None);
	};

	if value.is_empty() {
		return Ok(None);
	}

	<T as FromStr>::from_str(&value)
		.map(Some)
		.with_context(|| format!("failed to parse `{var}`"))
}
