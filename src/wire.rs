//! Wire-format renderings of requests and responses for diagnostics.
//!
//! Dumps mimic what travels over the socket: start line, headers, blank line, body. Bodies
//! are rendered as lossy UTF-8. Dumping never mutates the message.

// std
use std::fmt::Write as _;
// crates.io
use http::{HeaderMap, Version, header::HOST};
// self
use crate::transport::{HttpRequest, HttpResponse};

/// Renders a request as `METHOD /path?query HTTP/x` followed by headers and body.
pub fn dump_request(request: &HttpRequest) -> String {
	let uri = request.uri();
	let target = uri.path_and_query().map(|value| value.as_str()).unwrap_or("/");
	let mut out = format!("{} {target} {}\r\n", request.method(), version_label(request.version()));

	if let Some(authority) = uri.authority().filter(|_| !request.headers().contains_key(HOST)) {
		let _ = write!(out, "Host: {authority}\r\n");
	}

	write_headers(&mut out, request.headers());
	out.push_str("\r\n");
	out.push_str(&String::from_utf8_lossy(request.body()));

	out
}

/// Renders a response as `HTTP/x STATUS REASON` followed by headers and body.
pub fn dump_response(response: &HttpResponse) -> String {
	let status = response.status();
	let mut out = format!(
		"{} {} {}\r\n",
		version_label(response.version()),
		status.as_str(),
		status.canonical_reason().unwrap_or_default()
	);

	write_headers(&mut out, response.headers());
	out.push_str("\r\n");
	out.push_str(&String::from_utf8_lossy(response.body()));

	out
}

fn write_headers(out: &mut String, headers: &HeaderMap) {
	for (name, value) in headers {
		let _ = write!(out, "{name}: {}\r\n", String::from_utf8_lossy(value.as_bytes()));
	}
}

fn version_label(version: Version) -> &'static str {
	match version {
		Version::HTTP_09 => "HTTP/0.9",
		Version::HTTP_10 => "HTTP/1.0",
		Version::HTTP_2 => "HTTP/2.0",
		Version::HTTP_3 => "HTTP/3.0",
		_ => "HTTP/1.1",
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use http::StatusCode;
	// self
	use super::*;

	#[test]
	fn request_dump_includes_host_headers_and_body() {
		let request = http::Request::post("https://api.example.com/v1/domains/a.com/rs/aliases/x")
			.header("content-type", "application/x-www-form-urlencoded")
			.body(b"aliasEmails=a%40a.com".to_vec())
			.expect("Request fixture should build.");
		let dump = dump_request(&request);

		assert_eq!(
			dump,
			"POST /v1/domains/a.com/rs/aliases/x HTTP/1.1\r\nHost: api.example.com\r\n\
			 content-type: application/x-www-form-urlencoded\r\n\r\naliasEmails=a%40a.com"
		);
	}

	#[test]
	fn response_dump_includes_status_line() {
		let mut response = HttpResponse::new(b"{\"message\":\"nope\"}".to_vec());

		*response.status_mut() = StatusCode::NOT_FOUND;
		response.headers_mut().insert("x-request-id", "abc".parse().expect("Valid header."));

		assert_eq!(
			dump_response(&response),
			"HTTP/1.1 404 Not Found\r\nx-request-id: abc\r\n\r\n{\"message\":\"nope\"}"
		);
	}
}
