//! HTTP handlers for this service.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing, Json, Router};

use super::{FetchLeaderboardResponse, LeaderboardService};
use crate::middleware;

impl From<LeaderboardService> for Router {
	fn from(svc: LeaderboardService) -> Self {
		Router::new()
			.route("/", routing::get(get))
			.route_layer(middleware::cors::read_only())
			.with_state(svc)
	}
}

/// The leaderboard.
///
/// If the leaderboard cannot be computed at all, `rows` is `null` and the status is
/// `502 Bad Gateway`. Levels that failed to load do not affect the status.
#[tracing::instrument]
async fn get(State(svc): State<LeaderboardService>) -> (StatusCode, Json<FetchLeaderboardResponse>) {
	let result = svc.fetch_leaderboard().await;
	let status = if result.is_ok() {
		StatusCode::OK
	} else {
		StatusCode::BAD_GATEWAY
	};

	(status, Json(FetchLeaderboardResponse::from(result)))
}
