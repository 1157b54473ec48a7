//! Request dispatch: rate limiting, transport execution, classification, decoding.
//!
//! Every entry point runs the same pipeline:
//!
//! 1. dump the request when `debug_http` is on
//! 2. wait for a token from the bucket selected by the request method
//! 3. execute the transport call
//! 4. dump the response when `debug_http` is on
//! 5. classify the status through [`ErrorResponse::check`]
//!
//! Steps 2 and 3 race the caller's [`CallContext`]. The body is fully buffered by the transport,
//! so it is released on every exit path when the owning buffer drops. Entry points differ only
//! in what happens to a successful body: ignored ([`Client::send`]), decoded
//! ([`Client::send_json`]), or copied verbatim ([`Client::send_to_sink`]).

// std
use std::io::Write;
// self
use crate::{
	_prelude::*,
	client::Client,
	context::CallContext,
	error::{DecodeError, TransportError},
	limit::Bucket,
	obs::{self, RequestOutcome, RequestSpan, WireDirection},
	response::{ErrorResponse, Response},
	transport::{HttpRequest, HttpTransport},
	wire,
};

impl<C> Client<C>
where
	C: ?Sized + HttpTransport,
{
	/// Dispatches `request` and discards any successful body.
	pub async fn send(&self, ctx: &CallContext, request: HttpRequest) -> Result<Response> {
		self.instrumented(Bucket::for_method(request.method()), "send", async {
			let (response, _) = self.round_trip(ctx, request).await?;

			Ok(response)
		})
		.await
	}

	/// Dispatches `request` and decodes a successful JSON body into `T`.
	///
	/// Decode failures report the JSON path that did not match.
	pub async fn send_json<T>(&self, ctx: &CallContext, request: HttpRequest) -> Result<(T, Response)>
	where
		T: DeserializeOwned,
	{
		self.instrumented(Bucket::for_method(request.method()), "send_json", async {
			let (response, body) = self.round_trip(ctx, request).await?;
			let mut deserializer = serde_json::Deserializer::from_slice(&body);
			let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
				DecodeError {
					url: response.url.to_string(),
					status: response.status.as_u16(),
					source,
				}
			})?;

			Ok((value, response))
		})
		.await
	}

	/// Dispatches `request` and copies a successful body verbatim into `sink`.
	pub async fn send_to_sink<W>(
		&self,
		ctx: &CallContext,
		request: HttpRequest,
		sink: &mut W,
	) -> Result<Response>
	where
		W: ?Sized + Write,
	{
		self.instrumented(Bucket::for_method(request.method()), "send_to_sink", async {
			let (response, body) = self.round_trip(ctx, request).await?;

			sink.write_all(&body).and_then(|()| sink.flush()).map_err(TransportError::from)?;

			Ok(response)
		})
		.await
	}

	async fn instrumented<T, F>(&self, bucket: Bucket, stage: &'static str, fut: F) -> Result<T>
	where
		F: Future<Output = Result<T>>,
	{
		let span = RequestSpan::new(bucket, stage);

		obs::record_request_outcome(bucket, RequestOutcome::Attempt);

		let result = span.instrument(fut).await;

		obs::record_request_outcome(
			bucket,
			if result.is_ok() { RequestOutcome::Success } else { RequestOutcome::Failure },
		);

		result
	}

	async fn round_trip(
		&self,
		ctx: &CallContext,
		request: HttpRequest,
	) -> Result<(Response, Vec<u8>)> {
		let bucket = Bucket::for_method(request.method());
		let method = request.method().clone();
		let url = request.uri().clone();

		if self.debug_http {
			obs::log_wire_dump(WireDirection::Request, &wire::dump_request(&request));
		}

		self.limiter.acquire(bucket, ctx).await?;

		let response =
			ctx.run(self.http_client.execute(request)).await?.map_err(TransportError::network)?;

		if self.debug_http {
			obs::log_wire_dump(WireDirection::Response, &wire::dump_response(&response));
		}

		let (parts, body) = response.into_parts();
		let response = Response::new(method, url, parts);

		if let Some(error) = ErrorResponse::check(&response, &body) {
			return Err(error.into());
		}

		Ok((response, body))
	}
}
