//! The leaderboard ban filter.
//!
//! Banned players keep their records on the list, but never show up on the leaderboard.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::source::{self, DataSource, BANS_DOCUMENT};

/// A set of banned usernames.
///
/// Membership is an exact, case-sensitive comparison.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BanSet {
	#[allow(clippy::missing_docs_in_private_items)]
	users: HashSet<String>,
}

impl BanSet {
	/// Whether `user` is banned.
	pub fn contains(&self, user: &str) -> bool {
		self.users.contains(user)
	}

	/// The number of banned users.
	pub fn len(&self) -> usize {
		self.users.len()
	}

	/// Whether nobody is banned.
	pub fn is_empty(&self) -> bool {
		self.users.is_empty()
	}
}

impl<S> FromIterator<S> for BanSet
where
	S: Into<String>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = S>,
	{
		Self {
			users: iter.into_iter().map(Into::into).collect(),
		}
	}
}

/// Fetch the ban filter.
#[tracing::instrument(level = "debug", err(Display, level = "debug"))]
pub async fn fetch(source: &DataSource) -> source::Result<BanSet> {
	let bans = source.fetch::<BanSet>(BANS_DOCUMENT).await?;

	tracing::debug!(amount = bans.len(), "loaded bans");

	Ok(bans)
}

#[cfg(test)]
mod tests {
	use color_eyre::Result;

	use super::{fetch, BanSet};
	use crate::source::DataSource;
	use crate::testing;

	#[test]
	fn membership_is_case_sensitive() {
		let bans = ["Cheater"].into_iter().collect::<BanSet>();

		assert!(bans.contains("Cheater"), "exact name should be banned");
		assert!(!bans.contains("cheater"), "other casing should not be banned");
	}

	#[tokio::test]
	async fn fetch_works() -> Result<()> {
		let source = DataSource::memory([("_lbfilter", r#"["Cheater", "Hacker"]"#)]);
		let bans = fetch(&source).await?;

		testing::assert_eq!(bans.len(), 2);
		testing::assert!(bans.contains("Hacker"));

		Ok(())
	}

	#[tokio::test]
	async fn fetch_fails_without_document() -> Result<()> {
		let source = DataSource::memory([("_list", "[]")]);

		testing::assert!(fetch(&source).await.is_err());

		Ok(())
	}
}
