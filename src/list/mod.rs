//! Loading the list and its levels.
//!
//! The list document is an ordered array of [level paths]. Ranks are handed out to every entry
//! that is not a benchmark, in list order, *before* any level is fetched. Afterwards every level
//! is loaded concurrently; a level that fails to load is reported, but never prevents the other
//! levels from loading.
//!
//! [level paths]: LevelPath

use std::{fmt, iter};

use tokio::task::JoinSet;
use tracing::Instrument;

use crate::source::{self, DataSource, EDITORS_DOCUMENT, LIST_DOCUMENT};

mod error;
pub use error::{Error, Result};

pub(crate) mod http;

pub mod models;
pub use models::{Editor, EditorRole, Level, LevelOutcome, LevelPath, ListEntry, Record};

/// A service for loading the list.
#[derive(Clone)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct ListService {
	source: DataSource,
}

impl fmt::Debug for ListService {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ListService")
			.field("source", &self.source)
			.finish()
	}
}

impl ListService {
	/// Create a new [`ListService`].
	pub const fn new(source: DataSource) -> Self {
		Self { source }
	}

	/// Fetch the ordered level paths from the list document.
	#[tracing::instrument(level = "debug", err(Display, level = "debug"))]
	pub async fn fetch_paths(&self) -> Result<Vec<LevelPath>> {
		self.source
			.fetch(LIST_DOCUMENT)
			.await
			.map_err(Error::Unavailable)
	}

	/// Fetch the list and every level on it.
	///
	/// The returned entries are in list order. This only fails if the list document itself
	/// cannot be loaded; individual levels failing to load are reported as
	/// [`LevelOutcome::LoadFailed`].
	#[tracing::instrument(level = "debug", err(Display, level = "debug"))]
	pub async fn fetch_list(&self) -> Result<Vec<ListEntry>> {
		let paths = self.fetch_paths().await.inspect_err(|error| {
			tracing::error!(%error, "failed to load list");
		})?;

		let ranks = assign_ranks(&paths);
		let mut tasks = JoinSet::new();

		for (idx, (path, &rank)) in iter::zip(&paths, &ranks).enumerate() {
			let svc = self.clone();
			let path = path.clone();

			tasks.spawn(
				async move {
					let outcome = svc.fetch_level(&path, rank).await;
					(idx, outcome)
				}
				.in_current_span(),
			);
		}

		// tasks complete in any order; slot results back into list order
		let mut outcomes = iter::repeat_with(|| None)
			.take(paths.len())
			.collect::<Vec<_>>();

		while let Some(joined) = tasks.join_next().await {
			match joined {
				Ok((idx, outcome)) => {
					if let Some(slot) = outcomes.get_mut(idx) {
						*slot = Some(outcome);
					}
				}
				Err(error) => {
					tracing::error!(%error, "level task did not complete");
				}
			}
		}

		let entries = iter::zip(paths, ranks)
			.zip(outcomes)
			.map(|((path, rank), outcome)| {
				let outcome = match outcome {
					Some(Ok(level)) => LevelOutcome::Loaded(level),
					Some(Err(error)) => {
						tracing::error!(?rank, %path, %error, "failed to load level");
						LevelOutcome::LoadFailed(path.clone())
					}
					None => LevelOutcome::LoadFailed(path.clone()),
				};

				ListEntry {
					path,
					rank,
					outcome,
				}
			})
			.collect::<Vec<_>>();

		tracing::debug!(
			levels = entries.len(),
			failed = entries.iter().filter(|entry| entry.level().is_none()).count(),
			"loaded list",
		);

		Ok(entries)
	}

	/// Fetch a single level.
	///
	/// The level's records are sorted by percentage, highest first.
	#[tracing::instrument(level = "debug", err(Display, level = "debug"))]
	pub async fn fetch_level(&self, path: &LevelPath, rank: Option<u32>) -> source::Result<Level> {
		let mut level = self.source.fetch::<Level>(path.document()).await?;

		level.records.sort_by(|a, b| b.percent.cmp(&a.percent));
		level.rank = rank;
		level.path = path.to_string();

		Ok(level)
	}

	/// Fetch the list editors.
	///
	/// The editors document is optional; if it cannot be loaded, this returns `None`.
	#[tracing::instrument(level = "debug")]
	pub async fn fetch_editors(&self) -> Option<Vec<Editor>> {
		self.source
			.fetch(EDITORS_DOCUMENT)
			.await
			.inspect_err(|error| tracing::debug!(%error, "no editors"))
			.ok()
	}
}

/// Assigns ranks to list entries.
///
/// Benchmarks get `None`; every other entry gets its 1-based position among non-benchmark
/// entries.
pub fn assign_ranks(paths: &[LevelPath]) -> Vec<Option<u32>> {
	let mut next_rank = 1_u32;

	paths
		.iter()
		.map(|path| {
			if path.is_benchmark() {
				return None;
			}

			let rank = next_rank;
			next_rank = next_rank.saturating_add(1);
			Some(rank)
		})
		.collect()
}
