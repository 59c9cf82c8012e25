//! Types for this module.

use std::iter;

use serde::{Deserialize, Serialize};

use super::Error;
use crate::list::LevelPath;
use crate::scoring;

/// Points awarded for a single verification, completion or progress record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
	/// The rank of the level.
	pub rank: u32,

	/// The name of the level.
	pub level: String,

	/// How far the player got; only present for progress records.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub percent: Option<u8>,

	/// The points awarded.
	pub score: f64,

	/// Link to the video proof.
	pub link: String,
}

/// Everything a single player has scored, grouped by kind.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBucket {
	/// Levels the player verified.
	pub verified: Vec<ScoreEntry>,

	/// Levels the player completed.
	pub completed: Vec<ScoreEntry>,

	/// Progress records on levels the player has not completed.
	pub progressed: Vec<ScoreEntry>,
}

impl UserBucket {
	/// All entries, verifications first, then completions, then progress.
	pub fn entries(&self) -> impl Iterator<Item = &ScoreEntry> {
		iter::empty()
			.chain(&self.verified)
			.chain(&self.completed)
			.chain(&self.progressed)
	}

	/// The player's total score: the sum of all entries, [rounded].
	///
	/// Entries are summed in [`entries()`] order.
	///
	/// [rounded]: scoring::round
	/// [`entries()`]: UserBucket::entries
	pub fn total(&self) -> f64 {
		scoring::round(self.entries().map(|entry| entry.score).sum())
	}
}

/// A single row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
	/// The player's name, in the casing it first appeared with.
	pub user: String,

	/// The player's total score.
	pub total: f64,

	/// The individual entries making up `total`.
	#[serde(flatten)]
	pub scores: UserBucket,
}

/// A computed leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
	/// Players sorted by total score, highest first.
	///
	/// Players with equal totals are ordered by when they first appeared on the list.
	pub rows: Vec<LeaderboardRow>,

	/// List entries whose level failed to load, in list order.
	pub errors: Vec<LevelPath>,
}

/// Response payload for `GET /leaderboard`.
///
/// `rows` is `null` if the leaderboard could not be computed at all, in which case `errors`
/// contains the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchLeaderboardResponse {
	/// See [`Leaderboard::rows`].
	pub rows: Option<Vec<LeaderboardRow>>,

	/// See [`Leaderboard::errors`].
	pub errors: Vec<String>,
}

impl From<Result<Leaderboard, Error>> for FetchLeaderboardResponse {
	fn from(result: Result<Leaderboard, Error>) -> Self {
		match result {
			Ok(Leaderboard { rows, errors }) => Self {
				rows: Some(rows),
				errors: errors.iter().map(ToString::to_string).collect(),
			},
			Err(error) => Self {
				rows: None,
				errors: vec![error.to_string()],
			},
		}
	}
}
