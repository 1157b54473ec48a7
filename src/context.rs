//! Per-call cancellation and deadlines.
//!
//! Every outbound call takes a [`CallContext`]. The dispatcher races both the rate-limit wait
//! and the in-flight transport call against it, so a cancelled or expired context aborts the
//! call at whichever stage it has reached. Cancellation is checked first: a context that is
//! already done never reaches the network.

// crates.io
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
// self
use crate::_prelude::*;

/// Reason a [`CallContext`] stopped a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum Cancelled {
	/// The cancellation token was triggered.
	#[error("Call was cancelled by the caller.")]
	Cancelled,
	/// The context deadline elapsed.
	#[error("Call deadline elapsed.")]
	DeadlineExceeded,
}

/// Cancellation token plus optional deadline shared by every stage of a call.
///
/// Clones share the same token, so cancelling any clone cancels them all. Child contexts
/// created with [`CallContext::child`] are cancelled with their parent but can be cancelled
/// independently.
#[derive(Clone, Debug, Default)]
pub struct CallContext {
	token: CancellationToken,
	deadline: Option<Instant>,
}
impl CallContext {
	/// Creates a context that never cancels on its own.
	pub fn new() -> Self {
		Self::default()
	}

	/// Uses a caller-owned cancellation token.
	pub fn with_token(mut self, token: CancellationToken) -> Self {
		self.token = token;

		self
	}

	/// Sets an absolute deadline, keeping the earlier one if a deadline is already set.
	pub fn with_deadline(mut self, deadline: Instant) -> Self {
		self.deadline = Some(match self.deadline {
			Some(current) if current < deadline => current,
			_ => deadline,
		});

		self
	}

	/// Sets a deadline relative to now.
	pub fn with_timeout(self, timeout: Duration) -> Self {
		self.with_deadline(Instant::now() + timeout)
	}

	/// Derives a child context that inherits this context's deadline and cancellation.
	pub fn child(&self) -> Self {
		Self { token: self.token.child_token(), deadline: self.deadline }
	}

	/// Cancels this context (and every clone and child of it).
	pub fn cancel(&self) {
		self.token.cancel();
	}

	/// Returns the configured deadline, if any.
	pub fn deadline(&self) -> Option<Instant> {
		self.deadline
	}

	/// Returns the underlying cancellation token.
	pub fn token(&self) -> &CancellationToken {
		&self.token
	}

	/// Reports whether the context is already done, without waiting.
	pub fn check(&self) -> Result<(), Cancelled> {
		if self.token.is_cancelled() {
			return Err(Cancelled::Cancelled);
		}
		if self.deadline.is_some_and(|deadline| deadline <= Instant::now()) {
			return Err(Cancelled::DeadlineExceeded);
		}

		Ok(())
	}

	/// Drives `fut` to completion unless the context finishes first.
	///
	/// When the context wins, `fut` is dropped without being polled again.
	pub async fn run<F>(&self, fut: F) -> Result<F::Output, Cancelled>
	where
		F: Future,
	{
		self.check()?;

		let deadline = async {
			match self.deadline {
				Some(deadline) => tokio::time::sleep_until(deadline).await,
				None => std::future::pending::<()>().await,
			}
		};

		tokio::select! {
			biased;
			_ = self.token.cancelled() => Err(Cancelled::Cancelled),
			_ = deadline => Err(Cancelled::DeadlineExceeded),
			output = fut => Ok(output),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn run_returns_output_when_not_cancelled() {
		let ctx = CallContext::new();

		assert_eq!(ctx.run(async { 7 }).await, Ok(7));
	}

	#[tokio::test]
	async fn cancelled_context_never_polls_future() {
		let ctx = CallContext::new();

		ctx.cancel();

		let result = ctx.run(async { panic!("Future must not run after cancellation.") }).await;

		assert_eq!(result, Err::<(), _>(Cancelled::Cancelled));
	}

	#[tokio::test]
	async fn deadline_aborts_pending_future() {
		let ctx = CallContext::new().with_timeout(Duration::from_millis(20));
		let result = ctx.run(std::future::pending::<()>()).await;

		assert_eq!(result, Err(Cancelled::DeadlineExceeded));
	}

	#[test]
	fn earlier_deadline_wins() {
		let now = Instant::now();
		let ctx = CallContext::new()
			.with_deadline(now + Duration::from_secs(1))
			.with_deadline(now + Duration::from_secs(5));

		assert_eq!(ctx.deadline(), Some(now + Duration::from_secs(1)));
	}

	#[test]
	fn child_inherits_parent_cancellation() {
		let parent = CallContext::new();
		let child = parent.child();

		child.cancel();

		assert!(parent.check().is_ok());
		assert_eq!(child.check(), Err(Cancelled::Cancelled));

		let sibling = parent.child();

		parent.cancel();

		assert_eq!(sibling.check(), Err(Cancelled::Cancelled));
	}
}
