//! `X-Api-Signature` computation.
//!
//! The header value is `{user_key}:{timestamp}:{digest}` where `timestamp` is the UTC issue time
//! as `YYYYMMDDHHMMSS` and `digest` is the standard base64 SHA-1 of
//! `user_key || user_agent || timestamp || secret_key`. The service rejects stale timestamps,
//! so every request is signed at build time and never reused.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use http::header::{HeaderValue, USER_AGENT};
use sha1::{Digest, Sha1};
use time::UtcOffset;
// self
use crate::{_prelude::*, auth::Credentials, error::ConfigError};

/// Name of the proprietary authentication header.
pub const SIGNATURE_HEADER: &str = "x-api-signature";

/// Attaches signature headers derived from a [`Credentials`] pair.
#[derive(Clone, Debug)]
pub struct Signer {
	credentials: Credentials,
}
impl Signer {
	/// Creates a signer for the provided credentials.
	pub fn new(credentials: Credentials) -> Self {
		Self { credentials }
	}

	/// Returns the credentials backing this signer.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Computes the header value for a request issued at `at` with the given user agent.
	pub fn signature(&self, user_agent: &str, at: OffsetDateTime) -> String {
		let user_key = &self.credentials.user_key;
		let timestamp = format_timestamp(at);
		let mut hasher = Sha1::new();

		hasher.update(user_key.as_bytes());
		hasher.update(user_agent.as_bytes());
		hasher.update(timestamp.as_bytes());
		hasher.update(self.credentials.secret_key.expose().as_bytes());

		format!("{user_key}:{timestamp}:{}", STANDARD.encode(hasher.finalize()))
	}

	/// Signs `request` as of now, replacing any previous signature.
	///
	/// The digest covers the request's current `User-Agent` header (empty when absent), so call
	/// this after all other headers are in place.
	pub fn sign<B>(&self, request: &mut http::Request<B>) -> Result<(), ConfigError> {
		let user_agent = request
			.headers()
			.get(USER_AGENT)
			.and_then(|value| value.to_str().ok())
			.unwrap_or_default();
		let signature = self.signature(user_agent, OffsetDateTime::now_utc());
		let value = HeaderValue::try_from(signature)
			.map_err(|source| ConfigError::InvalidHeader { name: SIGNATURE_HEADER, source })?;

		request.headers_mut().insert(SIGNATURE_HEADER, value);

		Ok(())
	}
}

/// Renders `at` in UTC as `YYYYMMDDHHMMSS`.
pub fn format_timestamp(at: OffsetDateTime) -> String {
	let at = at.to_offset(UtcOffset::UTC);

	format!(
		"{:04}{:02}{:02}{:02}{:02}{:02}",
		at.year(),
		u8::from(at.month()),
		at.day(),
		at.hour(),
		at.minute(),
		at.second()
	)
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::{Date, Month, PrimitiveDateTime, Time};
	// self
	use super::*;

	fn at(year: i32, month: Month, day: u8, hms: (u8, u8, u8)) -> OffsetDateTime {
		let date = Date::from_calendar_date(year, month, day).expect("Fixture date is valid.");
		let time = Time::from_hms(hms.0, hms.1, hms.2).expect("Fixture time is valid.");

		PrimitiveDateTime::new(date, time).assume_utc()
	}

	#[test]
	fn timestamp_is_zero_padded_utc() {
		assert_eq!(format_timestamp(at(2024, Month::January, 2, (3, 4, 5))), "20240102030405");

		let shifted = at(2024, Month::January, 2, (3, 4, 5))
			.to_offset(UtcOffset::from_hms(5, 30, 0).expect("Offset is valid."));

		assert_eq!(format_timestamp(shifted), "20240102030405");
	}

	#[test]
	fn signature_matches_known_vectors() {
		let signer = Signer::new(Credentials::new("userid", "hunter2"));

		assert_eq!(
			signer.signature("agent", at(2019, Month::January, 1, (0, 0, 0))),
			"userid:20190101000000:4qcQGmywgcIEUuxJln6Tf57/o/g="
		);

		let signer = Signer::new(Credentials::new("test-user-key", "test-secret-key"));

		assert_eq!(
			signer.signature("emailsrvr-rs/0.1.0", at(2024, Month::January, 2, (3, 4, 5))),
			"test-user-key:20240102030405:u78xLxzzW87IBgp2KrtnJQHovPI="
		);
	}

	#[test]
	fn sign_stamps_current_time_and_replaces_previous_value() {
		let signer = Signer::new(Credentials::new("userid", "hunter2"));
		let mut request = http::Request::builder()
			.header(USER_AGENT, "agent")
			.header(SIGNATURE_HEADER, "stale")
			.body(())
			.expect("Request fixture should build.");
		let before = format_timestamp(OffsetDateTime::now_utc());

		signer.sign(&mut request).expect("Signing should succeed.");

		let after = format_timestamp(OffsetDateTime::now_utc());
		let values = request.headers().get_all(SIGNATURE_HEADER).iter().collect::<Vec<_>>();

		assert_eq!(values.len(), 1);

		let value = values[0].to_str().expect("Signature is ASCII.");
		let mut segments = value.splitn(3, ':');

		assert_eq!(segments.next(), Some("userid"));

		let timestamp = segments.next().expect("Timestamp segment is present.");

		assert!(before.as_str() <= timestamp && timestamp <= after.as_str());
		assert!(segments.next().is_some_and(|digest| digest.len() == 28));
	}
}
