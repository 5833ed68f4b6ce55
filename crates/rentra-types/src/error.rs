use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_with::skip_serializing_none;

pub type RtResult<T> = std::result::Result<T, Error>;

/// Error taxonomy for the whole platform.
///
/// Authorization and validation failures are raised at the boundary,
/// before any persistence attempt. Persistence and upstream failures are
/// mapped into `Conflict` / `ServiceUnavailable` with a human-readable
/// message; the underlying detail is diagnostic only.
#[derive(Debug)]
pub enum Error {
	/// Malformed, unsigned or expired bearer token
	Unauthorized,
	/// Role or tenant-scope violation
	PermissionDenied,
	ValidationError(String),
	/// Uniqueness violation (duplicate email / national id / tenant pair)
	Conflict(String),
	NotFound,
	/// Credentials valid but the trial window has elapsed
	TrialExpired,
	/// Upstream collaborator (SMTP, IDP) unavailable
	ServiceUnavailable(String),
	ConfigError(String),
	DbError,

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::Unauthorized => write!(f, "invalid token"),
			Error::PermissionDenied => write!(f, "access denied"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::Conflict(msg) => write!(f, "conflict: {}", msg),
			Error::NotFound => write!(f, "not found"),
			Error::TrialExpired => write!(f, "trial period expired"),
			Error::ServiceUnavailable(msg) => write!(f, "service unavailable: {}", msg),
			Error::ConfigError(msg) => write!(f, "config error: {}", msg),
			Error::DbError => write!(f, "database error"),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

/// Structured failure body. Never exposes a stack trace; `trial_expired`
/// is the discriminant callers branch on to prompt an upgrade instead of
/// retrying login.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct ErrorBody {
	pub message: String,
	#[serde(rename = "trialExpired")]
	pub trial_expired: Option<bool>,
}

impl Error {
	fn status(&self) -> StatusCode {
		match self {
			Error::Unauthorized => StatusCode::UNAUTHORIZED,
			Error::PermissionDenied => StatusCode::FORBIDDEN,
			Error::ValidationError(_) => StatusCode::BAD_REQUEST,
			Error::Conflict(_) => StatusCode::CONFLICT,
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::TrialExpired => StatusCode::FORBIDDEN,
			Error::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
			Error::ConfigError(_) | Error::DbError | Error::Io(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	fn body(&self) -> ErrorBody {
		let message = match self {
			Error::Unauthorized => "Token is not valid".into(),
			Error::PermissionDenied => "Access Denied".into(),
			Error::ValidationError(msg) => msg.clone(),
			Error::Conflict(msg) => msg.clone(),
			Error::NotFound => "Not found".into(),
			Error::TrialExpired => {
				"Your free trial period has expired. Please subscribe to continue using the service."
					.into()
			}
			Error::ServiceUnavailable(msg) => msg.clone(),
			Error::ConfigError(_) | Error::DbError | Error::Io(_) => "Internal server error".into(),
		};
		ErrorBody {
			message,
			trial_expired: matches!(self, Error::TrialExpired).then_some(true),
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		(self.status(), Json(self.body())).into_response()
	}
}


// vim: ts=4
