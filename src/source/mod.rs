//! Where list data comes from.
//!
//! Every piece of data the API works with is a JSON document identified by name: the list itself
//! (`_list`), the ban filter (`_lbfilter`), the editors (`_editors`), and one document per level,
//! named after the level's path. A [`DataSource`] knows how to turn such a name into a parsed
//! value, regardless of whether the documents live on a web server, on disk, or in memory.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use url::Url;

mod error;
pub use error::{Error, Result};

/// Name of the document containing the ordered list of level paths.
pub const LIST_DOCUMENT: &str = "_list";

/// Name of the document containing banned usernames.
pub const BANS_DOCUMENT: &str = "_lbfilter";

/// Name of the document containing the list editors.
pub const EDITORS_DOCUMENT: &str = "_editors";

/// A handle to the list's JSON documents.
///
/// Cloning is cheap; all variants share their state.
#[derive(Clone)]
pub enum DataSource {
	/// Documents are served over HTTP at `{base_url}/{name}.json`.
	Http {
		/// Client used for all requests.
		client: reqwest::Client,

		/// The directory URL all documents are relative to.
		base_url: Arc<Url>,
	},

	/// Documents are files at `{path}/{name}.json`.
	Directory(Arc<Path>),

	/// Documents are kept in memory, keyed by name.
	Memory(Arc<HashMap<String, String>>),
}

impl fmt::Debug for DataSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Http { base_url, .. } => f
				.debug_struct("Http")
				.field("base_url", &format_args!("{:?}", base_url.as_str()))
				.finish_non_exhaustive(),
			Self::Directory(path) => f.debug_tuple("Directory").field(path).finish(),
			Self::Memory(documents) => f
				.debug_struct("Memory")
				.field("documents", &documents.len())
				.finish(),
		}
	}
}

impl DataSource {
	/// Creates a [`DataSource`] that fetches documents over HTTP.
	///
	/// `base_url` is treated as a directory, even if it does not end with a `/`.
	pub fn http(client: reqwest::Client, mut base_url: Url) -> Self {
		if !base_url.path().ends_with('/') {
			let path = format!("{}/", base_url.path());
			base_url.set_path(&path);
		}

		Self::Http {
			client,
			base_url: Arc::new(base_url),
		}
	}

	/// Creates a [`DataSource`] that reads documents from a directory.
	pub fn directory<P>(path: P) -> Self
	where
		P: Into<PathBuf>,
	{
		Self::Directory(Arc::from(path.into()))
	}

	/// Creates a [`DataSource`] that serves the given `(name, json)` pairs.
	pub fn memory<I, K, V>(documents: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let documents = documents
			.into_iter()
			.map(|(name, json)| (name.into(), json.into()))
			.collect();

		Self::Memory(Arc::new(documents))
	}

	/// Fetches the document called `document` and parses it as a `T`.
	#[tracing::instrument(level = "debug", skip(self), err(Display, level = "debug"))]
	pub async fn fetch<T>(&self, document: &str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let bytes = self.fetch_raw(document).await?;

		serde_json::from_slice(&bytes).map_err(|source| Error::Json {
			document: document.to_owned(),
			source,
		})
	}

	/// Fetches the raw bytes of a document.
	async fn fetch_raw(&self, document: &str) -> Result<Vec<u8>> {
		if !is_valid_name(document) {
			return Err(Error::InvalidName {
				document: document.to_owned(),
			});
		}

		match self {
			Self::Http { client, base_url } => {
				let url = document_url(base_url, document)?;

				tracing::trace!(%url, "making http request");

				let http_error = |source: reqwest::Error| Error::Http {
					document: document.to_owned(),
					source,
				};

				let response = client.get(url).send().await.map_err(http_error)?;
				let status = response.status();

				if !status.is_success() {
					return Err(Error::Status {
						document: document.to_owned(),
						status,
					});
				}

				let bytes = response.bytes().await.map_err(http_error)?;

				Ok(bytes.to_vec())
			}
			Self::Directory(dir) => {
				let path = dir.join(format!("{document}.json"));

				tokio::fs::read(&path)
					.await
					.map_err(|source| Error::Io { path, source })
			}
			Self::Memory(documents) => documents
				.get(document)
				.map(|json| json.clone().into_bytes())
				.ok_or_else(|| Error::Missing {
					document: document.to_owned(),
				}),
		}
	}
}

/// The URL of `document` below `base_url`.
///
/// The name is pushed as a single, percent-encoded path segment, so characters like `:`, `?` or
/// `#` cannot change the host, query or fragment.
fn document_url(base_url: &Url, document: &str) -> Result<Url> {
	let mut url = base_url.clone();

	url.path_segments_mut()
		.map_err(|()| Error::InvalidName {
			document: document.to_owned(),
		})?
		.pop_if_empty()
		.push(&format!("{document}.json"));

	Ok(url)
}

/// Whether `document` is safe to use as a file name / URL segment.
///
/// Names come from the list document, so they must not be able to escape the data directory.
fn is_valid_name(document: &str) -> bool {
	!document.is_empty()
		&& !document.contains(['/', '\\'])
		&& document != "."
		&& document != ".."
}
