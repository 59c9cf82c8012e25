//! This module contains helpers for unit tests.

use serde_json::json;

use crate::source::DataSource;

/// Global constructor that will run before tests.
#[ctor::ctor]
fn ctor() {
	use tracing_subscriber::fmt::format::FmtSpan;
	use tracing_subscriber::EnvFilter;

	color_eyre::install().expect("failed to install color-eyre");
	tracing_subscriber::fmt()
		.compact()
		.with_ansi(true)
		.with_file(true)
		.with_level(true)
		.with_line_number(true)
		.with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
		.with_target(true)
		.with_test_writer()
		.with_env_filter(EnvFilter::from_default_env())
		.init();
}

macro_rules! assert {
	($expr:expr $(, $($msg:tt)*)?) => {
		::color_eyre::eyre::ensure!($expr $(, $($msg)*)?)
	};
}

macro_rules! assert_eq {
	($lhs:expr, $rhs:expr $(,)?) => {
		match (&$lhs, &$rhs) {
			(lhs, rhs) => {
				if lhs != rhs {
					::color_eyre::eyre::bail!(
						"assertion `{} == {}` failed\n  lhs: {:?}\n  rhs: {:?}",
						stringify!($lhs),
						stringify!($rhs),
						lhs,
						rhs,
					);
				}
			}
		}
	};
}

macro_rules! assert_matches {
	($expr:expr, $pat:pat $(if $cond:expr)? $(, $($msg:tt)*)?) => {
		::color_eyre::eyre::ensure!(
			matches!($expr, $pat $(if $cond)?),
			concat!("`", stringify!($expr), "` does not match `", stringify!($pat), "`")
		)
	};
}

pub(crate) use {assert, assert_eq, assert_matches};

/// A level document in the on-disk format.
///
/// `records` are `(user, percent)` pairs; links are derived from the user name.
pub(crate) fn level(
	name: &str,
	percent_to_qualify: u8,
	verifier: &str,
	records: &[(&str, u8)],
) -> String {
	let records = records
		.iter()
		.map(|&(user, percent)| {
			json!({
				"user": user,
				"percent": percent,
				"link": format!("https://youtu.be/{user}-{percent}"),
			})
		})
		.collect::<Vec<_>>();

	json!({
		"id": 0,
		"name": name,
		"author": "ViPriN",
		"creators": [],
		"verifier": verifier,
		"verification": format!("https://youtu.be/{verifier}-verification"),
		"percentToQualify": percent_to_qualify,
		"records": records,
	})
	.to_string()
}

/// An in-memory [`DataSource`] with the given list, level documents and bans.
///
/// `levels` are `(document name, level json)` pairs. Pass `None` for `bans` to leave out the ban
/// document entirely.
pub(crate) fn source(list: &[&str], levels: &[(&str, String)], bans: Option<&[&str]>) -> DataSource {
	let mut documents = vec![(String::from("_list"), json!(list).to_string())];

	if let Some(bans) = bans {
		documents.push((String::from("_lbfilter"), json!(bans).to_string()));
	}

	documents.extend(
		levels
			.iter()
			.map(|(name, level)| ((*name).to_owned(), level.clone())),
	);

	DataSource::memory(documents)
}
