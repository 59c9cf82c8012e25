//! HTTP handlers for this service.

use std::iter;

use axum::extract::{Path, State};
use axum::{routing, Json, Router};

use super::{assign_ranks, Editor, Level, ListEntry, ListService};
use crate::{middleware, Error, Result};

impl From<ListService> for Router {
	fn from(svc: ListService) -> Self {
		Router::new()
			.route("/list", routing::get(get_list))
			.route("/list/:path", routing::get(get_level))
			.route("/editors", routing::get(get_editors))
			.route_layer(middleware::cors::read_only())
			.with_state(svc)
	}
}

/// Every entry on the list, in order, including levels that failed to load.
#[tracing::instrument(err(Debug, level = "debug"))]
async fn get_list(State(svc): State<ListService>) -> Result<Json<Vec<ListEntry>>> {
	let list = svc.fetch_list().await?;

	Ok(Json(list))
}

/// A single level by its list entry (e.g. `acheron` or `_benchmark`).
#[tracing::instrument(err(Debug, level = "debug"))]
async fn get_level(
	State(svc): State<ListService>,
	Path(path): Path<String>,
) -> Result<Json<Level>> {
	let paths = svc.fetch_paths().await?;
	let ranks = assign_ranks(&paths);

	let Some((path, rank)) = iter::zip(paths, ranks).find(|(entry, _)| entry.as_str() == path)
	else {
		return Err(Error::not_found(format_args!("level `{path}`")));
	};

	let level = svc
		.fetch_level(&path, rank)
		.await
		.map_err(|error| Error::not_found(format_args!("level `{path}`")).context(error))?;

	Ok(Json(level))
}

/// The list staff.
#[tracing::instrument(err(Debug, level = "debug"))]
async fn get_editors(State(svc): State<ListService>) -> Result<Json<Vec<Editor>>> {
	svc.fetch_editors()
		.await
		.map(Json)
		.ok_or_else(Error::no_content)
}

#[cfg(test)]
mod tests {
	use axum::body::Body;
	use axum::http::{Request, StatusCode};
	use axum::Router;
	use color_eyre::Result;
	use http_body_util::BodyExt;
	use tower::ServiceExt;

	use crate::list::{Level, ListService};
	use crate::source::DataSource;
	use crate::testing;

	fn router() -> Router {
		let source = testing::source(
			&["acheron", "_bench", "missing"],
			&[
				("acheron", testing::level("Acheron", 55, "Zoink", &[("Trick", 100)])),
				("bench", testing::level("Bench", 100, "Someone", &[])),
			],
			Some(&[]),
		);

		Router::from(ListService::new(source))
	}

	async fn get(uri: &str) -> Result<(StatusCode, Vec<u8>)> {
		let req = Request::get(uri).body(Body::empty())?;
		let res = router().oneshot(req).await?;
		let status = res.status();
		let body = res.into_body().collect().await?.to_bytes().to_vec();

		Ok((status, body))
	}

	#[tokio::test]
	async fn get_level_works() -> Result<()> {
		let (status, body) = get("/list/acheron").await?;

		testing::assert_eq!(status, StatusCode::OK);

		let level = serde_json::from_slice::<Level>(&body)?;

		testing::assert_eq!(level.name, "Acheron");
		testing::assert_eq!(level.records.len(), 1);

		Ok(())
	}

	#[tokio::test]
	async fn get_level_not_found() -> Result<()> {
		let (status, _) = get("/list/tartarus").await?;

		testing::assert_eq!(status, StatusCode::NOT_FOUND);

		let (status, _) = get("/list/missing").await?;

		testing::assert_eq!(status, StatusCode::NOT_FOUND);

		Ok(())
	}

	#[tokio::test]
	async fn get_list_reports_failed_levels() -> Result<()> {
		let (status, body) = get("/list").await?;

		testing::assert_eq!(status, StatusCode::OK);

		let list = serde_json::from_slice::<serde_json::Value>(&body)?;

		testing::assert_eq!(list[0]["rank"], 1);
		testing::assert_eq!(list[0]["loaded"]["name"], "Acheron");
		testing::assert_eq!(list[1]["rank"], serde_json::Value::Null);
		testing::assert_eq!(list[2]["rank"], 2);
		testing::assert_eq!(list[2]["load_failed"], "missing");

		Ok(())
	}

	#[tokio::test]
	async fn get_editors_without_document() -> Result<()> {
		let (status, body) = get("/editors").await?;

		testing::assert_eq!(status, StatusCode::NO_CONTENT);
		testing::assert!(body.is_empty());

		Ok(())
	}

	#[tokio::test]
	async fn missing_list_is_a_bad_gateway() -> Result<()> {
		let router = Router::from(ListService::new(DataSource::memory([("_lbfilter", "[]")])));

		for uri in ["/list", "/list/acheron"] {
			let req = Request::get(uri).body(Body::empty())?;
			let res = router.clone().oneshot(req).await?;

			testing::assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

			let body = res.into_body().collect().await?.to_bytes();
			let json = serde_json::from_slice::<serde_json::Value>(&body)?;

			testing::assert_eq!(json["message"], "Failed to load list.");
		}

		Ok(())
	}
}
