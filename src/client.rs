//! API client: construction, request building, and dispatch.
//!
//! A [`Client`] owns everything a call needs: the base URL, the `User-Agent`, the signing
//! credentials, the shared read/write rate buckets, and a transport. Configuration is fixed at
//! construction through [`ClientBuilder`]; clones share the transport and both rate buckets,
//! so every clone draws from the same budget.

mod builder;
mod dispatch;
mod request;

pub use builder::*;

// self
use crate::{
	_prelude::*,
	auth::Signer,
	limit::DualRateLimiter,
	transport::HttpTransport,
};
#[cfg(feature = "reqwest")] use crate::transport::ReqwestHttpClient;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.emailsrvr.com/";
/// Media type sent in `Accept` (and in `Content-Type` for non-form requests).
pub const MEDIA_TYPE_JSON: &str = "application/json";
/// Media type of form-encoded `POST` bodies.
pub const MEDIA_TYPE_FORM: &str = "application/x-www-form-urlencoded";

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = Client<ReqwestHttpClient>;

/// Returns the `User-Agent` sent when none is configured.
pub fn default_user_agent() -> String {
	format!("emailsrvr-rs/{}", crate::VERSION)
}

/// Handle to the administration API.
pub struct Client<C>
where
	C: ?Sized + HttpTransport,
{
	http_client: Arc<C>,
	limiter: Arc<DualRateLimiter>,
	signer: Signer,
	base_url: Url,
	user_agent: String,
	debug_http: bool,
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient> {
	/// Starts configuring a new reqwest-backed client.
	///
	/// Other transports use [`ClientBuilder::new`] with [`ClientBuilder::build_with_transport`].
	pub fn builder() -> ClientBuilder {
		ClientBuilder::new()
	}
}
impl<C> Client<C>
where
	C: ?Sized + HttpTransport,
{
	/// Base URL every request path is resolved against.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// `User-Agent` header value, which is also part of every signature.
	pub fn user_agent(&self) -> &str {
		&self.user_agent
	}

	/// Public user key used to sign requests.
	pub fn user_key(&self) -> &str {
		&self.signer.credentials().user_key
	}

	/// Returns `true` when wire dumps are logged for every call.
	pub fn debug_http(&self) -> bool {
		self.debug_http
	}

	/// Rate buckets shared by this client and its clones.
	pub fn limiter(&self) -> &DualRateLimiter {
		&self.limiter
	}

	/// Underlying transport.
	pub fn http_client(&self) -> &C {
		&self.http_client
	}
}
impl<C> Clone for Client<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			limiter: self.limiter.clone(),
			signer: self.signer.clone(),
			base_url: self.base_url.clone(),
			user_agent: self.user_agent.clone(),
			debug_http: self.debug_http,
		}
	}
}
impl<C> Debug for Client<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("base_url", &self.base_url.as_str())
			.field("user_agent", &self.user_agent)
			.field("user_key", &self.user_key())
			.field("debug_http", &self.debug_http)
			.field("limiter", &self.limiter)
			.finish()
	}
}
