//! Runtime errors.
//!
//! This module exposes the [`Error`] type that HTTP handlers use for bubbling up errors. Specific
//! error cases have dedicated constructors, see all the public methods on [`Error`].
//!
//! [`Error`] implements [`IntoResponse`], which means it can be returned from HTTP handlers.
//!
//! This module also exposes a [`Result`] type alias, which sets [`Error`] as the default `E` type
//! parameter.
//!
//! [`Error`]: struct@Error

use std::fmt::{self, Display, Formatter};
use std::panic::Location;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use itertools::Itertools;
use serde_json::json;
use thiserror::Error;

use crate::list;

/// Type alias for a [`Result<T, E>`] with its `E` parameter set to [`Error`].
///
/// [`Result`]: std::result::Result
/// [`Error`]: struct@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The API's core error type.
///
/// It carries information about the kind of error that occurred, where it occurred, and any extra
/// information like error sources.
#[derive(Debug, Error)]
pub struct Error {
	/// The kind of error that occurred.
	///
	/// This determines the HTTP status code and error message for the response body.
	kind: ErrorKind,

	/// The source code location of where the error occurred.
	location: Location<'static>,

	/// Extra information about the error, like source errors.
	attachments: Vec<Attachment>,
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let Self {
			kind,
			location,
			attachments,
		} = self;

		write!(f, "[{location}] {kind}")?;

		if !attachments.is_empty() {
			write!(f, ":")?;

			for attachment in attachments.iter().rev() {
				write!(f, "\n  - {attachment}")?;
			}
		}

		Ok(())
	}
}

/// The different kinds of errors that can occur at runtime.
#[allow(clippy::missing_docs_in_private_items)]
#[derive(Debug, Error)]
enum ErrorKind {
	#[error("no content")]
	NoContent,

	#[error("could not find {what}")]
	NotFound { what: String },

	#[error(transparent)]
	List(#[from] list::Error),
}

#[allow(clippy::missing_docs_in_private_items)]
type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Generic error attachments.
#[derive(Debug, derive_more::Display)]
#[display("'{context}' at {location}")]
struct Attachment {
	/// The attachment context, usually a more concrete error.
	context: BoxedError,

	/// The source code location of where this attachment was created.
	location: Location<'static>,
}

impl Attachment {
	/// Creates a new [`Attachment`].
	#[track_caller]
	fn new<C>(context: C) -> Self
	where
		C: Into<BoxedError>,
	{
		Self {
			context: context.into(),
			location: *Location::caller(),
		}
	}
}

impl Error {
	/// Creates a new [`Error`] of the given [`ErrorKind`].
	///
	/// [`Error`]: struct@Error
	#[track_caller]
	fn new(kind: ErrorKind) -> Self {
		Self {
			kind,
			location: *Location::caller(),
			attachments: Vec::new(),
		}
	}

	/// Attach additional context to an error.
	#[track_caller]
	pub(crate) fn context<E>(mut self, ctx: E) -> Self
	where
		E: Into<BoxedError>,
	{
		self.attachments.push(Attachment::new(ctx));
		self
	}

	/// A generic `204 No Content` error.
	///
	/// This should be returned from `GET` handlers that would otherwise return an empty
	/// response body.
	#[track_caller]
	pub(crate) fn no_content() -> Self {
		Self::new(ErrorKind::NoContent)
	}

	/// An error signaling that a resource could not be found.
	///
	/// Produces a `404 Not Found` status.
	#[track_caller]
	pub(crate) fn not_found<T>(what: T) -> Self
	where
		T: Display,
	{
		Self::new(ErrorKind::NotFound {
			what: what.to_string(),
		})
	}
}

/// Nothing can be served without the list, so this produces a `502 Bad Gateway` status.
impl From<list::Error> for Error {
	#[track_caller]
	fn from(error: list::Error) -> Self {
		Self::new(ErrorKind::List(error))
	}
}

impl IntoResponse for Error {
	#[track_caller]
	fn into_response(self) -> Response {
		use ErrorKind as E;

		let message = self.kind.to_string();
		let status = match self.kind {
			E::NoContent => StatusCode::NO_CONTENT,
			E::NotFound { .. } => StatusCode::NOT_FOUND,
			E::List(_) => StatusCode::BAD_GATEWAY,
		};

		if status.is_server_error() {
			tracing::error!(%self, "failed to handle request");
		} else {
			tracing::debug! {
				location = %self.location,
				kind = ?self.kind,
				attachments = ?self.attachments,
				error_message = %message,
				"returning error from request handler"
			};
		}

		if status == StatusCode::NO_CONTENT {
			return status.into_response();
		}

		let mut json = json!({ "message": message });

		#[allow(clippy::indexing_slicing)]
		if !self.attachments.is_empty() {
			json["debug_info"] = self
				.attachments
				.iter()
				.rev()
				.map(|attachment| format!("{attachment}"))
				.collect_vec()
				.into();
		}

		(status, Json(json)).into_response()
	}
}
