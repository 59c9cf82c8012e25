//! The errors that can occur when computing the leaderboard.

use thiserror::Error;

use crate::{list, source};

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that prevent a leaderboard from being computed at all.
///
/// Individual levels failing to load are not errors; see [`Leaderboard::errors`].
///
/// [`Leaderboard::errors`]: super::Leaderboard::errors
#[derive(Debug, Error)]
pub enum Error {
	/// The list document could not be loaded.
	#[error(transparent)]
	ListUnavailable(#[from] list::Error),

	/// The ban filter could not be loaded.
	#[error("Failed to load bans list.")]
	BansUnavailable(#[source] source::Error),
}
