//! Request construction: URL resolution, form bodies, standard headers, signing.

// crates.io
use http::{
	Method,
	header::{ACCEPT, CONTENT_TYPE, HeaderValue, USER_AGENT},
};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	client::{Client, MEDIA_TYPE_FORM, MEDIA_TYPE_JSON},
	error::ConfigError,
	transport::{HttpRequest, HttpTransport},
};

impl<C> Client<C>
where
	C: ?Sized + HttpTransport,
{
	/// Resolves a relative request path (optionally with a query) against the base URL.
	///
	/// Paths must not start with `/`; standard reference resolution would otherwise discard any
	/// path prefix carried by the base URL.
	pub fn resolve_url(&self, path: &str) -> Result<Url, ConfigError> {
		if path.starts_with('/') {
			return Err(ConfigError::AbsolutePath { path: path.into() });
		}

		self.base_url
			.join(path)
			.map_err(|source| ConfigError::InvalidPath { path: path.into(), source })
	}

	/// Builds a signed request ready for dispatch.
	///
	/// `form`, when present, is encoded as `application/x-www-form-urlencoded` in key order.
	/// `POST` requests carrying a form advertise that media type; everything else advertises JSON.
	/// No network activity happens here.
	pub fn new_request(
		&self,
		method: Method,
		path: &str,
		form: Option<&BTreeMap<String, String>>,
	) -> Result<HttpRequest> {
		let url = self.resolve_url(path)?;
		let content_type =
			if method == Method::POST && form.is_some() { MEDIA_TYPE_FORM } else { MEDIA_TYPE_JSON };
		let body = form.map(encode_form).unwrap_or_default();
		let user_agent = HeaderValue::try_from(self.user_agent.as_str())
			.map_err(|source| ConfigError::InvalidHeader { name: "user-agent", source })?;
		let mut request = http::Request::builder()
			.method(method)
			.uri(url.as_str())
			.header(CONTENT_TYPE, content_type)
			.header(ACCEPT, MEDIA_TYPE_JSON)
			.header(USER_AGENT, user_agent)
			.body(body)
			.map_err(ConfigError::from)?;

		self.signer.sign(&mut request)?;

		Ok(request)
	}
}

fn encode_form(form: &BTreeMap<String, String>) -> Vec<u8> {
	form_urlencoded::Serializer::new(String::new()).extend_pairs(form).finish().into_bytes()
}

#[cfg(test)]
mod tests {
	// crates.io
	use http::header::HeaderMap;
	// self
	use super::*;
	use crate::{
		auth::SIGNATURE_HEADER, client::ClientBuilder, transport::testing::ScriptedTransport,
	};

	fn client(base_url: &str) -> Client<ScriptedTransport> {
		ClientBuilder::new()
			.base_url(base_url)
			.user_key("user")
			.secret_key("secret")
			.user_agent("agent/1.0")
			.build_with_transport(ScriptedTransport::new())
			.expect("Client should build.")
	}

	fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
		headers
			.get(name)
			.unwrap_or_else(|| panic!("Header {name} should be present."))
			.to_str()
			.expect("Header should be ASCII.")
	}

	#[test]
	fn get_request_has_json_headers_and_signature() {
		let request = client("https://api.example.com/")
			.new_request(Method::GET, "v1/domains?offset=0&size=50", None)
			.expect("Request should build.");

		assert_eq!(request.method(), Method::GET);
		assert_eq!(request.uri(), "https://api.example.com/v1/domains?offset=0&size=50");
		assert_eq!(header(request.headers(), "content-type"), MEDIA_TYPE_JSON);
		assert_eq!(header(request.headers(), "accept"), MEDIA_TYPE_JSON);
		assert_eq!(header(request.headers(), "user-agent"), "agent/1.0");
		assert!(request.body().is_empty());

		let signature = header(request.headers(), SIGNATURE_HEADER);
		let segments = signature.splitn(3, ':').collect::<Vec<_>>();

		assert_eq!(segments.len(), 3);
		assert_eq!(segments[0], "user");
		assert_eq!(segments[1].len(), 14);
		assert!(segments[1].bytes().all(|b| b.is_ascii_digit()));
		assert_eq!(segments[2].len(), 28, "Base64 SHA-1 digests are 28 characters.");
	}

	#[test]
	fn post_form_body_is_url_encoded() {
		let form = BTreeMap::from([
			("aliasEmails".to_owned(), "a@example.com,b@example.com".to_owned()),
			("note".to_owned(), "x y&z".to_owned()),
		]);
		let request = client("https://api.example.com")
			.new_request(Method::POST, "v1/domains/example.com/rs/aliases/sales", Some(&form))
			.expect("Request should build.");

		assert_eq!(header(request.headers(), "content-type"), MEDIA_TYPE_FORM);
		assert_eq!(
			String::from_utf8(request.body().clone()).expect("Form body is UTF-8."),
			"aliasEmails=a%40example.com%2Cb%40example.com&note=x+y%26z"
		);
	}

	#[test]
	fn delete_without_form_uses_json_content_type() {
		let request = client("https://api.example.com/")
			.new_request(Method::DELETE, "v1/domains/example.com/rs/aliases/sales", None)
			.expect("Request should build.");

		assert_eq!(header(request.headers(), "content-type"), MEDIA_TYPE_JSON);
		assert!(request.body().is_empty());
	}

	#[test]
	fn paths_resolve_against_base_prefix() {
		let client = client("https://proxy.example.com/emailsrvr/");

		assert_eq!(
			client.resolve_url("v1/domains").expect("Path should resolve.").as_str(),
			"https://proxy.example.com/emailsrvr/v1/domains"
		);
		assert!(matches!(
			client.resolve_url("/v1/domains"),
			Err(ConfigError::AbsolutePath { path }) if path == "/v1/domains"
		));
		assert!(matches!(
			client.resolve_url("http://[::1"),
			Err(ConfigError::InvalidPath { .. })
		));
	}

	#[test]
	fn invalid_user_agent_is_a_config_error() {
		let err = ClientBuilder::new()
			.user_agent("bad\nagent")
			.build_with_transport(ScriptedTransport::new())
			.expect("Client should build.")
			.new_request(Method::GET, "v1/domains", None)
			.expect_err("Control characters are not valid header values.");

		assert!(matches!(err, Error::Config(ConfigError::InvalidHeader { name: "user-agent", .. })));
	}
}
