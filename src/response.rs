//! Response metadata and API error classification.

// crates.io
use http::{HeaderMap, Method, StatusCode, Uri, Version};
// self
use crate::_prelude::*;

/// Metadata of a received API response.
///
/// The body is buffered by the transport and consumed by exactly one decode path inside the
/// dispatcher; only the envelope (request line, status, headers) is kept here.
#[derive(Clone, Debug)]
pub struct Response {
	/// Method of the request that produced this response.
	pub method: Method,
	/// Fully resolved URL of the request.
	pub url: Uri,
	/// HTTP status code.
	pub status: StatusCode,
	/// HTTP version negotiated by the transport.
	pub version: Version,
	/// Response headers.
	pub headers: HeaderMap,
}
impl Response {
	/// Assembles response metadata from the originating request line and response parts.
	pub fn new(method: Method, url: Uri, parts: http::response::Parts) -> Self {
		Self { method, url, status: parts.status, version: parts.version, headers: parts.headers }
	}

	/// Returns `true` for statuses within `[200, 299]`.
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}
}

/// Error reported by the API through a non-2xx status.
///
/// Always carries the originating request line and status. `message` and `request_id` come
/// from the JSON error envelope when the body is one; otherwise `message` holds the raw body
/// text and `request_id` is absent.
#[derive(Clone, Debug)]
pub struct ErrorResponse {
	/// Response that caused this error.
	pub response: Response,
	/// Error message from the envelope, or the raw body.
	pub message: String,
	/// Request identifier returned by the API, useful when contacting support.
	pub request_id: Option<String>,
}
impl ErrorResponse {
	/// Classifies a response: `None` for 2xx, otherwise a fully populated error.
	///
	/// Never fails; an empty or malformed body degrades to a raw-text message.
	pub fn check(response: &Response, body: &[u8]) -> Option<Self> {
		if response.is_success() {
			return None;
		}

		let mut error =
			Self { response: response.clone(), message: String::new(), request_id: None };

		if body.is_empty() {
			return Some(error);
		}

		match parse_envelope(body) {
			Some(envelope) => {
				error.message = envelope.message.unwrap_or_default();
				error.request_id = envelope.request_id.filter(|id| !id.is_empty());
			},
			None => error.message = String::from_utf8_lossy(body).into_owned(),
		}

		Some(error)
	}

	/// Method of the failed request.
	pub fn method(&self) -> &Method {
		&self.response.method
	}

	/// URL of the failed request.
	pub fn url(&self) -> &Uri {
		&self.response.url
	}

	/// HTTP status returned by the API.
	pub fn status(&self) -> StatusCode {
		self.response.status
	}
}
impl Display for ErrorResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{} {}: {}", self.method(), self.url(), self.status().as_u16())?;

		if let Some(request_id) = &self.request_id {
			write!(f, " (request {request_id:?})")?;
		}

		write!(f, " {}", self.message)
	}
}
impl StdError for ErrorResponse {}

#[derive(Deserialize)]
struct ErrorEnvelope {
	#[serde(default)]
	message: Option<String>,
	#[serde(default)]
	request_id: Option<String>,
}

fn parse_envelope(body: &[u8]) -> Option<ErrorEnvelope> {
	match serde_json::from_slice::<serde_json::Value>(body).ok()? {
		value @ serde_json::Value::Object(_) => serde_json::from_value(value).ok(),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(status: u16) -> Response {
		let (mut parts, ()) = http::Response::new(()).into_parts();

		parts.status = StatusCode::from_u16(status).expect("Fixture status is valid.");

		Response::new(
			Method::GET,
			Uri::from_static("https://api.example.com/v1/domains/missing.com"),
			parts,
		)
	}

	#[test]
	fn success_range_is_not_an_error() {
		for status in [200, 201, 204, 299] {
			assert!(ErrorResponse::check(&response(status), b"not json").is_none());
		}
	}

	#[test]
	fn envelope_fields_are_extracted() {
		let error =
			ErrorResponse::check(&response(404), br#"{"message":"not found","request_id":"abc"}"#)
				.expect("404 must classify as an error.");

		assert_eq!(error.status(), StatusCode::NOT_FOUND);
		assert_eq!(error.message, "not found");
		assert_eq!(error.request_id.as_deref(), Some("abc"));
		assert_eq!(
			error.to_string(),
			"GET https://api.example.com/v1/domains/missing.com: 404 (request \"abc\") not found"
		);
	}

	#[test]
	fn empty_body_still_produces_full_error() {
		let error = ErrorResponse::check(&response(500), b"").expect("500 must be an error.");

		assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(error.message, "");
		assert_eq!(error.request_id, None);
		assert_eq!(error.method(), Method::GET);
		assert_eq!(error.url().path(), "/v1/domains/missing.com");
		assert_eq!(
			error.to_string(),
			"GET https://api.example.com/v1/domains/missing.com: 500 "
		);
	}

	#[test]
	fn non_envelope_bodies_degrade_to_raw_text() {
		for body in [
			"<html>Bad Gateway</html>",
			"[\"message\"]",
			"\"just a string\"",
			"{\"message\": 42}",
		] {
			let error = ErrorResponse::check(&response(502), body.as_bytes())
				.expect("502 must be an error.");

			assert_eq!(error.message, body);
			assert_eq!(error.request_id, None);
		}
	}

	#[test]
	fn partial_envelope_keeps_missing_fields_empty() {
		let error = ErrorResponse::check(&response(400), br#"{"request_id":"r-1","extra":true}"#)
			.expect("400 must be an error.");

		assert_eq!(error.message, "");
		assert_eq!(error.request_id.as_deref(), Some("r-1"));
	}
}
