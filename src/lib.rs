//! Async client for the hosted-email administration REST API: signed requests, shared
//! read/write rate buckets, and paginated domain + alias listings.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod context;
pub mod error;
pub mod limit;
pub mod obs;
pub mod pagination;
pub mod resources;
pub mod response;
pub mod transport;
pub mod wire;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::{Client, ClientBuilder},
		limit::RateLimit,
		transport::ReqwestHttpClient,
	};

	/// Identity used by every test client.
	pub const TEST_USER_KEY: &str = "test-user-key";
	/// Shared secret used by every test client.
	pub const TEST_SECRET_KEY: &str = "test-secret-key";

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = Client<ReqwestHttpClient>;

	/// Builder pre-populated with test credentials and rate buckets generous enough that
	/// tests never wait on them unless they opt into tighter limits.
	pub fn test_client_builder(base_url: &str) -> ClientBuilder {
		Client::builder()
			.base_url(base_url)
			.user_key(TEST_USER_KEY)
			.secret_key(TEST_SECRET_KEY)
			.read_limit(RateLimit::new(1_000.0, 100))
			.write_limit(RateLimit::new(1_000.0, 100))
	}

	/// Constructs a reqwest-backed [`Client`] pointed at a mock server base URL.
	pub fn build_reqwest_test_client(base_url: &str) -> Result<ReqwestTestClient> {
		test_client_builder(base_url).build()
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use http::{Method, StatusCode};
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;

/// Library version reported in the default `User-Agent`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)] use {color_eyre as _, httpmock as _};

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use crate::_preludet::*;

	#[test]
	fn test_helpers_build_throttle_free_clients() {
		let client = build_reqwest_test_client("https://api.example.com/")
			.expect("Test client should build.");

		assert_eq!(client.user_key(), TEST_USER_KEY);
		assert_eq!(client.limiter().limit(crate::limit::Bucket::Read).burst, 100);
	}
}
