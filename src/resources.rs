//! Typed accessors for the API's resources.
//!
//! Accessors borrow a [`Client`](crate::client::Client) and are obtained through
//! [`Client::domains`](crate::client::Client::domains) and
//! [`Client::aliases`](crate::client::Client::aliases). Required string arguments are validated
//! before any request is built, so an [`ArgError`](crate::error::ArgError) never costs a rate
//! token.

pub mod aliases;
pub mod domains;

pub use aliases::*;
pub use domains::*;

// self
use crate::{_prelude::*, error::ArgError};

const SEGMENT_SCRATCH_URL: &str = "https://segment.invalid/";

/// Percent-encodes a caller-supplied value so it resolves as exactly one path segment.
///
/// `/`, `\`, `?`, `#` and `%` are escaped. Empty values, `.`, `..` and values carrying control
/// characters are rejected since URL parsing would drop or reinterpret them.
pub(crate) fn path_segment(argument: &'static str, value: &str) -> Result<String, ArgError> {
	ArgError::require_non_empty(argument, value)?;

	if matches!(value, "." | "..") {
		return Err(ArgError::new(argument, "cannot be a relative path segment"));
	}
	if value.chars().any(char::is_control) {
		return Err(ArgError::new(argument, "cannot contain control characters"));
	}

	let unencodable = || ArgError::new(argument, "cannot be encoded as a path segment");
	let mut scratch = Url::parse(SEGMENT_SCRATCH_URL).map_err(|_| unencodable())?;

	scratch.path_segments_mut().map_err(|()| unencodable())?.pop_if_empty().push(value);

	scratch.path().strip_prefix('/').map(ToOwned::to_owned).ok_or_else(unencodable)
}
