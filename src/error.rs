//! Client-level error types shared by the dispatcher, paginator, and resource accessors.

// self
use crate::{_prelude::*, context::Cancelled, response::ErrorResponse};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Caller supplied an invalid argument; raised before any network activity.
	#[error(transparent)]
	Arg(#[from] ArgError),
	/// Local configuration or request-construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The caller's context was cancelled or its deadline elapsed.
	#[error(transparent)]
	Cancelled(#[from] Cancelled),
	/// Transport failure (DNS, TCP, TLS, IO).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The API answered with a status outside the 2xx range.
	#[error(transparent)]
	Api(Box<ErrorResponse>),
	/// A successful response body did not match the expected payload shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}
impl Error {
	/// Returns the API error details when the service rejected the request.
	pub fn as_api(&self) -> Option<&ErrorResponse> {
		match self {
			Self::Api(response) => Some(response),
			_ => None,
		}
	}

	/// Returns `true` when the call was aborted by its [`CallContext`](crate::context::CallContext).
	pub fn is_cancelled(&self) -> bool {
		matches!(self, Self::Cancelled(_))
	}
}
impl From<ErrorResponse> for Error {
	fn from(e: ErrorResponse) -> Self {
		Self::Api(Box::new(e))
	}
}

/// Invalid caller input, identified by argument name.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("`{argument}` is invalid because it {reason}.")]
pub struct ArgError {
	/// Name of the offending argument.
	pub argument: &'static str,
	/// Human-readable explanation.
	pub reason: &'static str,
}
impl ArgError {
	/// Creates a new argument error.
	pub const fn new(argument: &'static str, reason: &'static str) -> Self {
		Self { argument, reason }
	}

	/// Rejects empty strings for the named argument.
	pub fn require_non_empty(argument: &'static str, value: &str) -> Result<(), Self> {
		if value.is_empty() {
			return Err(Self::new(argument, "cannot be an empty string"));
		}

		Ok(())
	}
}

/// Configuration and request-construction failures raised by the client.
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
	HttpRequest(#[from] http::Error),
	/// A header value contains characters HTTP does not allow.
	#[error("Header `{name}` has an invalid value.")]
	InvalidHeader {
		/// Header name.
		name: &'static str,
		/// Underlying validation failure.
		#[source]
		source: http::header::InvalidHeaderValue,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Rejected URL string.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Relative request path cannot be resolved against the base URL.
	#[error("Request path `{path}` is invalid.")]
	InvalidPath {
		/// Rejected path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request paths are resolved against the base URL and must not start with `/`.
	#[error("Request path `{path}` must be relative (no leading `/`).")]
	AbsolutePath {
		/// Rejected path.
		path: String,
	},
	/// Rate or burst for a bucket is out of range.
	#[error("The {bucket} bucket needs a positive finite rate and a burst of at least 1 (got {per_second}/s, burst {burst}).")]
	InvalidRateLimit {
		/// Bucket label.
		bucket: &'static str,
		/// Rejected sustained rate.
		per_second: f64,
		/// Rejected burst capacity.
		burst: u32,
	},
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

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport or while writing to a sink.
	#[error("I/O error occurred while handling the API response.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// A 2xx response body could not be decoded into the requested type.
#[derive(Debug, ThisError)]
#[error("Response body from {url} does not match the expected shape.")]
pub struct DecodeError {
	/// URL of the request whose response failed to decode.
	pub url: String,
	/// HTTP status of the response.
	pub status: u16,
	/// Structured parsing failure, including the JSON path that failed.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}
