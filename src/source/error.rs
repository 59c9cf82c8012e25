//! The errors that can occur when fetching documents.

use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when fetching a document from a [`DataSource`].
///
/// [`DataSource`]: super::DataSource
#[derive(Debug, Error)]
pub enum Error {
	/// The HTTP request itself failed (connection, timeout, body).
	#[error("failed to fetch `{document}`: {source}")]
	Http {
		/// The requested document.
		document: String,

		/// The underlying error.
		#[source]
		source: reqwest::Error,
	},

	/// The server responded, but not with a success status.
	#[error("failed to fetch `{document}`: server responded with {status}")]
	Status {
		/// The requested document.
		document: String,

		/// The response status.
		status: StatusCode,
	},

	/// The document could not be read from disk.
	#[error("failed to read `{}`: {source}", .path.display())]
	Io {
		/// The file we tried to read.
		path: PathBuf,

		/// The underlying error.
		#[source]
		source: io::Error,
	},

	/// The document name could escape the source (e.g. `../secrets`) or is empty.
	#[error("`{document}` is not a valid document name")]
	InvalidName {
		/// The requested document.
		document: String,
	},

	/// The document does not exist in an in-memory source.
	#[error("document `{document}` does not exist")]
	Missing {
		/// The requested document.
		document: String,
	},

	/// The document was fetched but is not valid JSON of the expected shape.
	#[error("failed to parse `{document}`: {source}")]
	Json {
		/// The requested document.
		document: String,

		/// The underlying error.
		#[source]
		source: serde_json::Error,
	},
}
