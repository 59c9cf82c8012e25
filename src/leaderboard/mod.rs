//! The leaderboard.
//!
//! Every record on every ranked level is worth some amount of points, as determined by a
//! [scoring curve]. Summing them up per player gives the leaderboard.
//!
//! Computing it happens in three steps:
//!
//! 1. The list and all of its levels are loaded ([`ListService::fetch_list()`]), along with the
//!    ban filter. Without the list or the bans there is no leaderboard; individual levels
//!    failing to load are merely reported.
//! 2. [`aggregate()`] walks every ranked level, crediting its verifier and every record holder
//!    who is not banned. Player names are matched case-insensitively, see [`Identities`].
//! 3. [`build()`] sums each player's points and sorts the result.
//!
//! [scoring curve]: crate::scoring

use std::fmt;
use std::sync::Arc;

use crate::bans::{self, BanSet};
use crate::list::{LevelOutcome, ListEntry, ListService};
use crate::scoring::Scoring;
use crate::source::DataSource;

pub(crate) mod http;

mod error;
pub use error::{Error, Result};

pub mod identity;
pub use identity::Identities;

pub mod models;
pub use models::{FetchLeaderboardResponse, Leaderboard, LeaderboardRow, ScoreEntry, UserBucket};

/// A service for computing the leaderboard.
#[derive(Clone)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct LeaderboardService {
	source: DataSource,
	list_svc: ListService,
	scoring: Arc<dyn Scoring>,
}

impl fmt::Debug for LeaderboardService {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LeaderboardService")
			.field("source", &self.source)
			.finish_non_exhaustive()
	}
}

impl LeaderboardService {
	/// Create a new [`LeaderboardService`].
	pub fn new(source: DataSource, scoring: Arc<dyn Scoring>) -> Self {
		Self {
			list_svc: ListService::new(source.clone()),
			source,
			scoring,
		}
	}

	/// Compute the leaderboard.
	///
	/// Nothing is cached; every call loads all data from scratch.
	#[tracing::instrument(level = "debug", err(Display, level = "debug"))]
	pub async fn fetch_leaderboard(&self) -> Result<Leaderboard> {
		let list = self.list_svc.fetch_list().await?;

		let bans = bans::fetch(&self.source).await.map_err(|error| {
			tracing::error!(%error, "failed to load bans");
			Error::BansUnavailable(error)
		})?;

		let identities = aggregate(&list, &bans, &*self.scoring);
		let rows = build(identities);
		let errors = list
			.into_iter()
			.filter_map(|entry| match entry.outcome {
				LevelOutcome::LoadFailed(path) => Some(path),
				LevelOutcome::Loaded(_) => None,
			})
			.collect::<Vec<_>>();

		tracing::debug!(players = rows.len(), errors = errors.len(), "computed leaderboard");

		Ok(Leaderboard { rows, errors })
	}
}

/// Credits every verification and record on ranked levels to its player.
///
/// Levels without a rank (benchmarks) and levels that failed to load are skipped; the number of
/// remaining levels is the `list_length` passed to `scoring`. Levels are processed in list order,
/// and a level's verifier before its records, which determines whose casing of a name wins.
///
/// Players are checked against `bans` by their canonical name. Banned players never get a
/// bucket, so they do not become canonical names either.
pub fn aggregate<S>(list: &[ListEntry], bans: &BanSet, scoring: &S) -> Identities
where
	S: Scoring + ?Sized,
{
	let ranked = list
		.iter()
		.filter_map(|entry| Some((entry.rank?, entry.level()?)))
		.collect::<Vec<_>>();

	let list_length = ranked.len();
	let mut identities = Identities::new();

	for (rank, level) in ranked {
		let score = |percent| scoring.score(rank, percent, level.percent_to_qualify, list_length);

		if bans.contains(identities.resolve(&level.verifier)) {
			tracing::trace!(level = %level.name, verifier = %level.verifier, "skipping banned verifier");
		} else {
			identities
				.get_or_create(&level.verifier)
				.verified
				.push(ScoreEntry {
					rank,
					level: level.name.clone(),
					percent: None,
					score: score(100),
					link: level.verification.clone(),
				});
		}

		for record in &level.records {
			if bans.contains(identities.resolve(&record.user)) {
				continue;
			}

			let bucket = identities.get_or_create(&record.user);

			if record.is_completion() {
				bucket.completed.push(ScoreEntry {
					rank,
					level: level.name.clone(),
					percent: None,
					score: score(100),
					link: record.link.clone(),
				});
			} else {
				bucket.progressed.push(ScoreEntry {
					rank,
					level: level.name.clone(),
					percent: Some(record.percent),
					score: score(record.percent),
					link: record.link.clone(),
				});
			}
		}
	}

	identities
}

/// Turns aggregated buckets into leaderboard rows, highest total first.
///
/// The sort is stable, so players with equal totals stay in order of first appearance.
pub fn build(identities: Identities) -> Vec<LeaderboardRow> {
	let mut rows = identities
		.into_users()
		.into_iter()
		.map(|(user, scores)| LeaderboardRow {
			user,
			total: scores.total(),
			scores,
		})
		.collect::<Vec<_>>();

	rows.sort_by(|a, b| b.total.total_cmp(&a.total));
	rows
}
