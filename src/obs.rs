//! Optional observability helpers for API calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `emailsrvr.request` with the `bucket` (rate
//!   bucket) and `stage` (call site) fields, and to log wire dumps at `DEBUG` under the
//!   `emailsrvr::wire` target when the client's `debug_http` switch is on.
//! - Enable `metrics` to increment the `emailsrvr_request_total` counter for every
//!   attempt/success/failure, labeled by `bucket` + `outcome`.

mod metrics;
mod tracing;

pub use self::metrics::*;
pub use self::tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each dispatched request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to the dispatcher.
	Attempt,
	/// 2xx response decoded successfully.
	Success,
	/// Any error propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Direction of a wire dump.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireDirection {
	/// Outgoing request.
	Request,
	/// Incoming response.
	Response,
}
impl WireDirection {
	/// Returns a stable label suitable for log fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			WireDirection::Request => "request",
			WireDirection::Response => "response",
		}
	}
}
