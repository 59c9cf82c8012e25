//! Case-insensitive player identities.
//!
//! Records are submitted by hand, so the same player regularly shows up as `Zoink`, `zoink` and
//! `ZOINK`. All of these are the same player; whichever casing appears first becomes the
//! canonical name everything is grouped under.

use std::collections::hash_map::{self, HashMap};

use super::UserBucket;

/// A player seen while aggregating.
#[derive(Debug)]
struct Identity {
	/// Position in which this player first appeared.
	order: usize,

	/// The name in the casing it first appeared with.
	canonical: String,

	/// Everything the player has scored so far.
	bucket: UserBucket,
}

/// Maps case-folded usernames to canonical names and their score buckets.
#[derive(Debug, Default)]
pub struct Identities {
	/// Keyed by lowercase username.
	users: HashMap<String, Identity>,
}

impl Identities {
	/// Creates an empty set of identities.
	pub fn new() -> Self {
		Self::default()
	}

	/// The canonical name for `name`.
	///
	/// If a player with the same name in any casing has been seen before, that player's name is
	/// returned; otherwise `name` is returned as-is.
	pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
		self.users
			.get(&name.to_lowercase())
			.map_or(name, |identity| identity.canonical.as_str())
	}

	/// The score bucket for `name`, creating an empty one if this player has not been seen
	/// before.
	pub fn get_or_create(&mut self, name: &str) -> &mut UserBucket {
		let order = self.users.len();

		let identity = match self.users.entry(name.to_lowercase()) {
			hash_map::Entry::Occupied(entry) => entry.into_mut(),
			hash_map::Entry::Vacant(entry) => {
				tracing::trace!(user = name, "new player");

				entry.insert(Identity {
					order,
					canonical: name.to_owned(),
					bucket: UserBucket::default(),
				})
			}
		};

		&mut identity.bucket
	}

	/// The number of distinct players.
	pub fn len(&self) -> usize {
		self.users.len()
	}

	/// Whether no player has been seen.
	pub fn is_empty(&self) -> bool {
		self.users.is_empty()
	}

	/// All players with their buckets, in order of first appearance.
	pub fn into_users(self) -> Vec<(String, UserBucket)> {
		let mut users = self.users.into_values().collect::<Vec<_>>();

		users.sort_unstable_by_key(|identity| identity.order);
		users
			.into_iter()
			.map(|identity| (identity.canonical, identity.bucket))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::Identities;
	use crate::leaderboard::ScoreEntry;

	#[test]
	fn first_casing_wins() {
		let mut identities = Identities::new();

		assert_eq!(identities.resolve("Zoink"), "Zoink");

		identities.get_or_create("Zoink");

		assert_eq!(identities.resolve("zoink"), "Zoink");
		assert_eq!(identities.resolve("ZOINK"), "Zoink");
		assert_eq!(identities.resolve("Trick"), "Trick");
	}

	#[test]
	fn variants_share_a_bucket() {
		let mut identities = Identities::new();

		identities.get_or_create("Bob").completed.push(entry(1.0));
		identities.get_or_create("BOB").completed.push(entry(2.0));
		identities.get_or_create("bob").progressed.push(entry(3.0));

		assert_eq!(identities.len(), 1);

		let users = identities.into_users();
		let (name, bucket) = users.first().expect("there should be a user");

		assert_eq!(name, "Bob");
		assert_eq!(bucket.completed.len(), 2);
		assert_eq!(bucket.progressed.len(), 1);
	}

	#[test]
	fn users_keep_first_appearance_order() {
		let mut identities = Identities::new();

		for name in ["c", "a", "B", "b", "d", "A"] {
			identities.get_or_create(name);
		}

		let names = identities
			.into_users()
			.into_iter()
			.map(|(name, _)| name)
			.collect::<Vec<_>>();

		assert_eq!(names, ["c", "a", "B", "d"]);
	}

	fn entry(score: f64) -> ScoreEntry {
		ScoreEntry {
			rank: 1,
			level: String::from("Tidal Wave"),
			percent: None,
			score,
			link: String::new(),
		}
	}
}
