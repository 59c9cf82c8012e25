//! How many points a record is worth.
//!
//! The leaderboard does not care about the exact curve; it only needs something implementing
//! [`Scoring`]. Plain functions and closures with the right signature work, and [`Curve`] is the
//! curve community lists usually ship with.

/// Number of decimal places scores and totals are rounded to.
pub const DECIMAL_PLACES: i32 = 3;

/// A scoring curve.
pub trait Scoring: Send + Sync {
	/// The score for reaching `percent` on the level ranked `rank`.
	///
	/// `percent_to_qualify` is the level's minimum accepted progress, and `list_length` is the
	/// number of ranked levels that loaded successfully.
	fn score(&self, rank: u32, percent: u8, percent_to_qualify: u8, list_length: usize) -> f64;
}

impl<F> Scoring for F
where
	F: Fn(u32, u8, u8, usize) -> f64 + Send + Sync,
{
	fn score(&self, rank: u32, percent: u8, percent_to_qualify: u8, list_length: usize) -> f64 {
		self(rank, percent, percent_to_qualify, list_length)
	}
}

/// The classic list curve.
///
/// A completion of the top level is worth [`Curve::max_score`]; scores fall off with
/// `rank ^ exponent`. Progress scales linearly between the qualifying percentage and 100%, and
/// loses a third of its value. `list_length` does not influence this curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
	/// Score for completing the #1 level.
	pub max_score: f64,

	/// How fast scores decay with rank.
	pub decay: f64,

	/// Exponent applied to `rank - 1`.
	pub exponent: f64,

	/// Levels ranked below this only award points for completions.
	pub main_cutoff: u32,

	/// Levels ranked below this award no points at all.
	pub extended_cutoff: u32,
}

impl Default for Curve {
	fn default() -> Self {
		Self {
			max_score: 200.0,
			decay: 24.9975,
			exponent: 0.4,
			main_cutoff: 75,
			extended_cutoff: 150,
		}
	}
}

impl Scoring for Curve {
	fn score(&self, rank: u32, percent: u8, percent_to_qualify: u8, _list_length: usize) -> f64 {
		let is_completion = percent == 100;

		if rank == 0 || rank > self.extended_cutoff {
			return 0.0;
		}

		if rank > self.main_cutoff && !is_completion {
			return 0.0;
		}

		let base = self.max_score - self.decay * f64::from(rank - 1).powf(self.exponent);
		let floor = f64::from(percent_to_qualify) - 1.0;
		let progress = (f64::from(percent) - floor) / (100.0 - floor);
		let score = (base * progress).max(0.0);

		if is_completion {
			round(score)
		} else {
			round(score - score / 3.0)
		}
	}
}

/// Rounds `value` to [`DECIMAL_PLACES`] decimal places.
///
/// Ties are rounded away from zero.
pub fn round(value: f64) -> f64 {
	let factor = 10_f64.powi(DECIMAL_PLACES);

	(value * factor).round() / factor
}

#[cfg(test)]
mod tests {
	use super::{round, Curve, Scoring};

	fn approx_eq(lhs: f64, rhs: f64) -> bool {
		(lhs - rhs).abs() < 1e-9
	}

	#[test]
	fn rounding() {
		assert!(approx_eq(round(1.2344), 1.234), "should round down");
		assert!(approx_eq(round(1.2346), 1.235), "should round up");
		assert!(approx_eq(round(0.0625), 0.063), "ties round away from zero");
		assert!(approx_eq(round(-0.0625), -0.063), "ties round away from zero");
		assert!(approx_eq(round(42.0), 42.0), "integers stay integers");
	}

	#[test]
	fn top_level_completion() {
		let curve = Curve::default();

		assert!(approx_eq(curve.score(1, 100, 100, 10), 200.0), "#1 should be worth 200");
		assert!(approx_eq(curve.score(1, 100, 50, 10), 200.0), "qualifying % is irrelevant at 100%");
	}

	#[test]
	fn decays_with_rank() {
		let curve = Curve::default();

		// 200 - 24.9975 * 1 ^ 0.4
		assert!(approx_eq(curve.score(2, 100, 100, 10), 175.003), "#2 completion");

		let mut previous = f64::INFINITY;

		for rank in 1..=150 {
			let score = curve.score(rank, 100, 100, 150);

			assert!(score < previous, "score should decrease with rank (rank {rank})");
			assert!(score >= 0.0, "score should never be negative (rank {rank})");

			previous = score;
		}
	}

	#[test]
	fn progress() {
		let curve = Curve::default();

		// 200 * (60 - 49) / (100 - 49) = 43.137..., minus a third = 28.758
		assert!(approx_eq(curve.score(1, 60, 50, 10), 28.758), "60% on #1");

		assert!(approx_eq(curve.score(1, 40, 50, 10), 0.0), "below qualifying should be worth nothing");
	}

	#[test]
	fn cutoffs() {
		let curve = Curve::default();

		assert!(curve.score(76, 100, 100, 200) > 0.0, "completions count past the main cutoff");
		assert!(approx_eq(curve.score(76, 99, 50, 200), 0.0), "progress does not");
		assert!(approx_eq(curve.score(151, 100, 100, 200), 0.0), "nothing counts past the extended cutoff");
	}

	#[test]
	fn closures_are_curves() {
		let flat = |_rank: u32, percent: u8, _q: u8, list_length: usize| {
			f64::from(percent) * f64::from(u32::try_from(list_length).unwrap_or(u32::MAX))
		};

		assert!(approx_eq(flat.score(7, 50, 40, 2), 100.0), "closure should be called as-is");
	}
}
