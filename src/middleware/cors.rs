//! CORS configuration.
//!
//! All data served by this API is public and read-only, so any origin may read it.

use axum::http::Method;
use tower_http::cors::{AllowMethods, CorsLayer};

/// A CORS layer that only allows the provided request methods but is otherwise permissive.
pub(crate) fn permissive<M>(methods: M) -> CorsLayer
where
	M: Into<AllowMethods>,
{
	CorsLayer::permissive().allow_methods(methods)
}

/// [`permissive()`] for `GET` requests.
pub(crate) fn read_only() -> CorsLayer {
	permissive([Method::GET, Method::HEAD, Method::OPTIONS])
}
