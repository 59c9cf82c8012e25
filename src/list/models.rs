//! Types for this module.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// An entry of the list document.
///
/// Entries starting with [`LevelPath::BENCHMARK_MARKER`] are benchmark levels: they are shown
/// alongside the list, but never ranked and never scored.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display("{raw}")]
#[serde(transparent)]
pub struct LevelPath {
	/// The entry as it appears in the list document, marker included.
	raw: String,
}

impl LevelPath {
	/// Prefix marking an entry as a benchmark.
	pub const BENCHMARK_MARKER: char = '_';

	/// Creates a new [`LevelPath`] from a list entry.
	pub fn new<S>(raw: S) -> Self
	where
		S: Into<String>,
	{
		Self { raw: raw.into() }
	}

	/// Whether this entry is a benchmark level.
	pub fn is_benchmark(&self) -> bool {
		self.raw.starts_with(Self::BENCHMARK_MARKER)
	}

	/// The name of the level's document, i.e. the entry without its benchmark marker.
	pub fn document(&self) -> &str {
		self.raw
			.strip_prefix(Self::BENCHMARK_MARKER)
			.unwrap_or(&self.raw)
	}

	/// The entry as it appears in the list document.
	pub fn as_str(&self) -> &str {
		&self.raw
	}
}

impl From<&str> for LevelPath {
	fn from(raw: &str) -> Self {
		Self::new(raw)
	}
}

/// A level, as stored in its document, plus the data assigned while loading the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
	/// The in-game level ID.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<u64>,

	/// The level's name.
	pub name: String,

	/// The level's publisher.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub author: Option<String>,

	/// Everyone who worked on the level.
	#[serde(default)]
	pub creators: Vec<String>,

	/// The player who beat the level first.
	pub verifier: String,

	/// Link to the verification video.
	pub verification: String,

	/// The minimum percentage a progress record must reach to be accepted.
	pub percent_to_qualify: u8,

	/// Victors and progress records, highest percentage first.
	pub records: Vec<Record>,

	/// The level's position among ranked levels, or `None` for benchmarks.
	#[serde(default, skip_deserializing)]
	pub rank: Option<u32>,

	/// The level's entry in the list document.
	#[serde(default, skip_deserializing)]
	pub path: String,
}

/// A single record on a [`Level`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
	/// The player who set the record.
	pub user: String,

	/// How far the player got, `1..=100`.
	pub percent: u8,

	/// Link to the video proof.
	pub link: String,
}

impl Record {
	/// Whether this record is a full completion rather than progress.
	pub const fn is_completion(&self) -> bool {
		self.percent == 100
	}
}

/// A loaded entry of the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
	/// The entry as it appears in the list document.
	pub path: LevelPath,

	/// The level's position among ranked levels.
	///
	/// This is assigned before the level is loaded, so a level failing to load does not shift
	/// the ranks of the levels after it.
	pub rank: Option<u32>,

	/// The level, or the reason it is missing.
	#[serde(flatten)]
	pub outcome: LevelOutcome,
}

impl ListEntry {
	/// The loaded level, if loading succeeded.
	pub const fn level(&self) -> Option<&Level> {
		match &self.outcome {
			LevelOutcome::Loaded(level) => Some(level),
			LevelOutcome::LoadFailed(_) => None,
		}
	}
}

/// The result of loading a single level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelOutcome {
	/// The level document was loaded successfully.
	Loaded(Level),

	/// The level document could not be loaded.
	LoadFailed(LevelPath),
}

/// A member of the list staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Editor {
	/// What the editor does.
	pub role: EditorRole,

	/// The editor's name.
	pub name: String,

	/// Link to the editor's profile.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub link: Option<String>,
}

/// The role of an [`Editor`].
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorRole {
	Owner,
	Admin,
	Helper,
	Dev,
	Trial,

	/// Any role we don't know about.
	#[serde(other)]
	Other,
}
