//! Client configuration: a serde-loadable [`ClientConfig`] and the fluent [`ClientBuilder`].

// self
use crate::{
	_prelude::*,
	auth::{Credentials, SecretKey, Signer},
	client::{Client, DEFAULT_BASE_URL, default_user_agent},
	error::ConfigError,
	limit::{DualRateLimiter, RateLimit},
	transport::HttpTransport,
};
#[cfg(feature = "reqwest")] use crate::transport::ReqwestHttpClient;

/// Complete client configuration.
///
/// Every field has a default, so partial documents (for example a config file that only sets
/// credentials) deserialize cleanly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
	/// Base URL request paths are resolved against.
	pub base_url: String,
	/// `User-Agent` override; [`default_user_agent`] when absent.
	pub user_agent: Option<String>,
	/// Key pair used to sign requests.
	pub credentials: Credentials,
	/// Logs full request/response dumps at `DEBUG` when enabled.
	pub debug_http: bool,
	/// Bucket for `GET` requests.
	pub read_limit: RateLimit,
	/// Bucket for every other method.
	pub write_limit: RateLimit,
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.into(),
			user_agent: None,
			credentials: Credentials::default(),
			debug_http: false,
			read_limit: RateLimit::DEFAULT_READ,
			write_limit: RateLimit::DEFAULT_WRITE,
		}
	}
}

/// Builder for [`Client`].
#[derive(Clone, Debug, Default)]
pub struct ClientBuilder {
	config: ClientConfig,
}
impl ClientBuilder {
	/// Starts from [`ClientConfig::default`].
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the whole configuration.
	pub fn config(mut self, config: ClientConfig) -> Self {
		self.config = config;

		self
	}

	/// Overrides the base URL.
	pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
		self.config.base_url = base_url.into();

		self
	}

	/// Overrides the `User-Agent`.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.config.user_agent = Some(user_agent.into());

		self
	}

	/// Sets the public user key.
	pub fn user_key(mut self, user_key: impl Into<String>) -> Self {
		self.config.credentials.user_key = user_key.into();

		self
	}

	/// Sets the shared secret.
	pub fn secret_key(mut self, secret_key: impl Into<String>) -> Self {
		self.config.credentials.secret_key = SecretKey::new(secret_key);

		self
	}

	/// Sets both halves of the key pair.
	pub fn credentials(mut self, credentials: Credentials) -> Self {
		self.config.credentials = credentials;

		self
	}

	/// Toggles wire dumps.
	pub fn debug_http(mut self, enabled: bool) -> Self {
		self.config.debug_http = enabled;

		self
	}

	/// Overrides the `GET` bucket.
	pub fn read_limit(mut self, limit: RateLimit) -> Self {
		self.config.read_limit = limit;

		self
	}

	/// Overrides the bucket shared by all non-`GET` methods.
	pub fn write_limit(mut self, limit: RateLimit) -> Self {
		self.config.write_limit = limit;

		self
	}

	/// Builds a client backed by a freshly constructed reqwest transport.
	#[cfg(feature = "reqwest")]
	pub fn build(self) -> Result<Client<ReqwestHttpClient>> {
		let client = ReqwestClient::builder().build().map_err(ConfigError::from)?;

		self.build_with_transport(ReqwestHttpClient::with_client(client))
	}

	/// Builds a client on top of a caller-provided transport.
	pub fn build_with_transport<C>(self, http_client: C) -> Result<Client<C>>
	where
		C: HttpTransport,
	{
		self.build_with_shared_transport(Arc::new(http_client))
	}

	/// Builds a client on top of a transport that is already shared (possibly type-erased).
	pub fn build_with_shared_transport<C>(self, http_client: Arc<C>) -> Result<Client<C>>
	where
		C: ?Sized + HttpTransport,
	{
		let ClientConfig { base_url, user_agent, credentials, debug_http, read_limit, write_limit } =
			self.config;
		let base_url = parse_base_url(base_url)?;
		let limiter = DualRateLimiter::new(read_limit, write_limit)?;

		Ok(Client {
			http_client,
			limiter: Arc::new(limiter),
			signer: Signer::new(credentials),
			base_url,
			user_agent: user_agent.unwrap_or_else(default_user_agent),
			debug_http,
		})
	}
}

fn parse_base_url(raw: String) -> Result<Url, ConfigError> {
	let url = match Url::parse(&raw) {
		Ok(url) => url,
		Err(source) => return Err(ConfigError::InvalidBaseUrl { url: raw, source }),
	};

	if url.cannot_be_a_base() {
		return Err(ConfigError::InvalidBaseUrl {
			url: raw,
			source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
		});
	}

	Ok(url)
}
