//! Client-level backpressure: one token bucket for reads, one for everything else.
//!
//! The pair is owned by a [`Client`](crate::client::Client) and shared (through an `Arc`) with
//! every request that client issues, including requests made from clones of it. Waiting is the
//! only suspension point before network I/O and is cancellable through a [`CallContext`].

// std
use std::num::NonZeroU32;
// crates.io
use governor::{DefaultDirectRateLimiter, Quota};
// self
use crate::{
	_prelude::*,
	context::{CallContext, Cancelled},
	error::ConfigError,
};

/// Which bucket gates a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bucket {
	/// `GET` requests.
	Read,
	/// Every other method (`POST`, `PUT`, `DELETE`, ...).
	Write,
}
impl Bucket {
	/// Selects the bucket for an HTTP method.
	pub fn for_method(method: &http::Method) -> Self {
		if method == http::Method::GET { Self::Read } else { Self::Write }
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Bucket::Read => "read",
			Bucket::Write => "write",
		}
	}
}
impl Display for Bucket {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Sustained rate and burst capacity for one bucket.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateLimit {
	/// Tokens replenished per second; fractional rates are allowed.
	pub per_second: f64,
	/// Maximum number of tokens that can accumulate.
	pub burst: u32,
}
impl RateLimit {
	/// Default read bucket: 1.9 requests per second, no burst.
	pub const DEFAULT_READ: Self = Self::new(1.9, 1);
	/// Default write bucket: 1.4 requests per second, no burst.
	pub const DEFAULT_WRITE: Self = Self::new(1.4, 1);

	/// Creates a new rate limit.
	pub const fn new(per_second: f64, burst: u32) -> Self {
		Self { per_second, burst }
	}

	fn quota(self, bucket: Bucket) -> Result<Quota, ConfigError> {
		let invalid = || ConfigError::InvalidRateLimit {
			bucket: bucket.as_str(),
			per_second: self.per_second,
			burst: self.burst,
		};

		if !self.per_second.is_finite() || self.per_second <= 0. {
			return Err(invalid());
		}

		let burst = NonZeroU32::new(self.burst).ok_or_else(invalid)?;
		let period = Duration::try_from_secs_f64(self.per_second.recip()).map_err(|_| invalid())?;

		Quota::with_period(period).map(|quota| quota.allow_burst(burst)).ok_or_else(invalid)
	}
}

/// Two independent token buckets selected by [`Bucket`].
pub struct DualRateLimiter {
	read: DefaultDirectRateLimiter,
	write: DefaultDirectRateLimiter,
	limits: [RateLimit; 2],
}
impl DualRateLimiter {
	/// Builds both buckets, validating each configuration.
	pub fn new(read: RateLimit, write: RateLimit) -> Result<Self, ConfigError> {
		Ok(Self {
			read: DefaultDirectRateLimiter::direct(read.quota(Bucket::Read)?),
			write: DefaultDirectRateLimiter::direct(write.quota(Bucket::Write)?),
			limits: [read, write],
		})
	}

	/// Returns the configuration a bucket was built with.
	pub fn limit(&self, bucket: Bucket) -> RateLimit {
		match bucket {
			Bucket::Read => self.limits[0],
			Bucket::Write => self.limits[1],
		}
	}

	/// Waits for a token from `bucket`, consuming it on success.
	///
	/// Fails without consuming a token when `ctx` is cancelled or its deadline elapses first.
	pub async fn acquire(&self, bucket: Bucket, ctx: &CallContext) -> Result<(), Cancelled> {
		ctx.run(self.bucket(bucket).until_ready()).await
	}

	/// Takes a token if one is available right now.
	pub fn try_acquire(&self, bucket: Bucket) -> bool {
		self.bucket(bucket).check().is_ok()
	}

	fn bucket(&self, bucket: Bucket) -> &DefaultDirectRateLimiter {
		match bucket {
			Bucket::Read => &self.read,
			Bucket::Write => &self.write,
		}
	}
}
impl Debug for DualRateLimiter {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DualRateLimiter")
			.field("read", &self.limits[0])
			.field("write", &self.limits[1])
			.finish()
	}
}
