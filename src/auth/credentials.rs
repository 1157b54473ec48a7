//! API key pair that identifies the caller and keys request signatures.

// self
use crate::_prelude::*;

/// Redacted shared-secret wrapper keeping sensitive material out of logs.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretKey(String);
impl SecretKey {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for SecretKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SecretKey").field(&"<redacted>").finish()
	}
}
impl Display for SecretKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Caller identity (user key) plus the shared secret used to sign requests.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
	/// Public user key; sent in clear as the first signature segment.
	pub user_key: String,
	/// Shared secret; only ever fed into the signature digest.
	pub secret_key: SecretKey,
}
impl Credentials {
	/// Creates a credential pair.
	pub fn new(user_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
		Self { user_key: user_key.into(), secret_key: SecretKey::new(secret_key) }
	}
}
