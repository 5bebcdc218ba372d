//! Client-level error types shared across the token provider, transports, and endpoints.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request-construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Access token acquisition failed.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Transport failure (DNS, TCP, TLS, timeouts).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The platform answered with a non-success status or application code.
	#[error(transparent)]
	Remote(#[from] RemoteApiError),
}
impl Error {
	/// Returns the HTTP status attached to the error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Auth(AuthError::Status { status, .. }) => Some(*status),
			Self::Remote(RemoteApiError::Status { status, .. }) => Some(*status),
			_ => None,
		}
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// A header value (usually a bearer token) contains forbidden characters.
	#[error("Header value is invalid.")]
	InvalidHeaderValue(#[from] oauth2::http::header::InvalidHeaderValue),
	/// Application configuration failed validation.
	#[error(transparent)]
	App(#[from] crate::config::AppConfigError),
	/// Endpoint path cannot be joined onto the base URL.
	#[error("Endpoint path `{path}` cannot be resolved against the base URL.")]
	InvalidEndpoint {
		/// Offending endpoint path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL cannot carry path segments (e.g. `data:` URLs).
	#[error("Base URL `{url}` cannot carry path segments.")]
	OpaqueBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// A local attachment could not be read.
	#[error("Attachment `{path}` could not be read.")]
	Attachment {
		/// Path of the attachment on disk.
		path: String,
		/// Underlying I/O failure.
		#[source]
		source: std::io::Error,
	},
	/// JSON payload could not be serialized.
	#[error("Request payload could not be serialized.")]
	Payload(#[from] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Credential exchange failures.
///
/// Values are cheap to clone so a single failed refresh can be handed to every caller that was
/// waiting on it.
#[derive(Clone, Debug, ThisError)]
pub enum AuthError {
	/// The identity endpoint could not be called.
	#[error("Identity endpoint call failed.")]
	Exchange {
		/// Mapped transport or request-construction failure.
		#[source]
		source: Arc<Error>,
	},
	/// The identity endpoint answered with a non-success HTTP status.
	#[error("Identity endpoint returned HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// The platform rejected the credentials with an application error code.
	#[error("Identity endpoint rejected the credentials with code {code}: {message}.")]
	Rejected {
		/// Platform error code.
		code: i64,
		/// Platform error message.
		message: String,
	},
	/// The identity endpoint responded with malformed JSON.
	#[error("Identity endpoint returned malformed JSON.")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: Arc<serde_path_to_error::Error<serde_json::Error>>,
		/// HTTP status code.
		status: u16,
	},
	/// The response did not include the expected token field.
	#[error("Identity endpoint response is missing `{field}`.")]
	MissingToken {
		/// Name of the missing JSON field.
		field: &'static str,
	},
	/// The response carried a missing or non-positive expiry.
	#[error("Identity endpoint returned an unusable expiry: {expire:?}.")]
	InvalidExpiry {
		/// Raw expiry value in seconds, when present.
		expire: Option<i64>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling `{operation}`.")]
	Network {
		/// Operation label of the failed call.
		operation: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request did not complete within the transport's timeout.
	#[error("Request to `{operation}` timed out.")]
	Timeout {
		/// Operation label of the failed call.
		operation: &'static str,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
	/// Transport reported a failure that fits no other category.
	#[error("HTTP client error occurred while calling `{operation}`: {message}.")]
	Other {
		/// Operation label of the failed call.
		operation: &'static str,
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		operation: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { operation, source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(
		operation: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Timeout { operation, source: Box::new(src) }
	}
}

/// Non-success answers from API endpoints.
#[derive(Debug, ThisError)]
pub enum RemoteApiError {
	/// The endpoint answered with a non-2xx HTTP status; the raw body is preserved.
	#[error("Endpoint `{operation}` returned HTTP {status}.")]
	Status {
		/// Operation label of the call.
		operation: &'static str,
		/// HTTP status code.
		status: u16,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
		/// Raw response body for caller inspection.
		body: Vec<u8>,
	},
	/// The response body is not a JSON envelope.
	#[error("Endpoint returned a malformed response envelope.")]
	MalformedBody {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The response envelope carried a non-zero application code.
	#[error("Endpoint returned application code {code}: {message}.")]
	Code {
		/// Platform error code.
		code: i64,
		/// Platform error message.
		message: String,
	},
}
