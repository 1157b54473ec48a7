// self
use crate::{
	_prelude::*,
	limit::Bucket,
	obs::WireDirection,
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// A span builder used by the dispatcher and paginator.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the provided bucket + stage.
	pub fn new(bucket: Bucket, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("emailsrvr.request", bucket = bucket.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (bucket, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a rendered wire dump at `DEBUG` (when tracing is enabled).
pub fn log_wire_dump(direction: WireDirection, dump: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(target: "emailsrvr::wire", direction = direction.as_str(), "{dump}");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (direction, dump);
	}
}

/// Emits a `DEBUG` event for one fetched page (when tracing is enabled).
pub fn log_page(offset: u32, size: u32, total: u32) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(offset, size, total, "Fetched listing page.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (offset, size, total);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn wire_dump_noop_without_subscriber() {
		log_wire_dump(WireDirection::Request, "GET / HTTP/1.1\r\n\r\n");
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = RequestSpan::new(Bucket::Read, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
