//! The errors that can occur when loading the list.

use thiserror::Error;

use crate::source;

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that prevent the list from being loaded at all.
#[derive(Debug, Error)]
pub enum Error {
	/// The list document could not be loaded.
	#[error("Failed to load list.")]
	Unavailable(#[source] source::Error),
}
