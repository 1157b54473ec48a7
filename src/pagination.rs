//! Offset/size pagination over listing endpoints.
//!
//! Every listing endpoint answers with the same envelope: `offset`, `size`, `total`, plus a named
//! array of items. [`Paginator`] walks those pages one at a time, advancing the offset by the
//! page size the service reports, and stops once `total <= size + offset`. The service's `total`
//! is trusted as-is; a service that keeps growing it keeps the loop going.

// std
use std::mem;
// crates.io
use url::form_urlencoded;
// self
use crate::{_prelude::*, obs, response::Response};

/// Page size requested when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Caller-controlled paging cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageOptions {
	/// Index of the first item to return.
	pub offset: u32,
	/// Number of items per page; `0` means [`DEFAULT_PAGE_SIZE`].
	pub size: u32,
}
impl PageOptions {
	/// Creates options starting at `offset` with the given page size.
	pub const fn new(offset: u32, size: u32) -> Self {
		Self { offset, size }
	}

	/// Creates options starting at the first item with the given page size.
	pub const fn with_size(size: u32) -> Self {
		Self::new(0, size)
	}

	/// Resolves optional caller options, applying the default page size where needed.
	pub fn resolve(options: Option<Self>) -> Self {
		let options = options.unwrap_or_default();

		Self { offset: options.offset, size: options.effective_size() }
	}

	/// Page size after applying the default for `0`.
	pub const fn effective_size(self) -> u32 {
		if self.size == 0 { DEFAULT_PAGE_SIZE } else { self.size }
	}

	/// Appends `offset` and `size` query parameters to a relative request path.
	pub fn append_to(self, path: &str) -> String {
		let query = form_urlencoded::Serializer::new(String::new())
			.append_pair("offset", &self.offset.to_string())
			.append_pair("size", &self.effective_size().to_string())
			.finish();
		let separator = if path.contains('?') { '&' } else { '?' };

		format!("{path}{separator}{query}")
	}
}

/// A decoded listing page.
pub trait PageEnvelope {
	/// Item type carried by the page.
	type Item;

	/// Offset the service applied to this page.
	fn offset(&self) -> u32;

	/// Page size the service applied to this page.
	fn size(&self) -> u32;

	/// Total number of items across all pages, as reported by the service.
	fn total(&self) -> u32;

	/// Consumes the page, yielding its items in service order.
	fn into_items(self) -> Vec<Self::Item>;

	/// Returns `true` when this page covers the reported total.
	fn is_last(&self) -> bool {
		u64::from(self.total()) <= u64::from(self.size()) + u64::from(self.offset())
	}

	/// Offset of the page that follows this one.
	fn next_offset(&self) -> u32 {
		self.size().saturating_add(self.offset())
	}
}

/// Items gathered from every page of a listing.
#[derive(Clone, Debug)]
pub struct Listing<T> {
	/// Items from all pages, page order then in-page order.
	pub items: Vec<T>,
	/// Number of pages fetched.
	pub pages: usize,
	/// Response metadata of the last fetched page.
	pub last_response: Option<Response>,
}
impl<T> Listing<T> {
	/// Drops the paging metadata.
	pub fn into_items(self) -> Vec<T> {
		self.items
	}
}

/// A listing that stopped early because a page fetch failed.
///
/// Carries the items accumulated before the failure. Converting into [`Error`] keeps only the
/// failure.
pub struct PartialListing<T> {
	/// Items gathered before the failing page.
	pub items: Vec<T>,
	/// Failure that aborted the listing.
	pub error: Error,
}
impl<T> Debug for PartialListing<T> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PartialListing")
			.field("items", &self.items.len())
			.field("error", &self.error)
			.finish()
	}
}
impl<T> Display for PartialListing<T> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Listing aborted after {} items: {}", self.items.len(), self.error)
	}
}
impl<T> StdError for PartialListing<T> {
	fn source(&self) -> Option<&(dyn StdError + 'static)> {
		Some(&self.error)
	}
}
impl<T> From<PartialListing<T>> for Error {
	fn from(partial: PartialListing<T>) -> Self {
		partial.error
	}
}

/// Lazy, strictly sequential page walker.
///
/// `fetch` receives the options for the next page and performs exactly one request.
pub struct Paginator<F> {
	options: PageOptions,
	fetch: F,
	done: bool,
}
impl<F> Paginator<F> {
	/// Options the next fetch will use.
	pub fn options(&self) -> PageOptions {
		self.options
	}

	/// Returns `true` once the last page was fetched or a fetch failed.
	pub fn is_done(&self) -> bool {
		self.done
	}
}
impl<F, Fut, P> Paginator<F>
where
	F: FnMut(PageOptions) -> Fut,
	Fut: Future<Output = Result<(P, Response)>>,
	P: PageEnvelope,
{
	/// Creates a paginator starting from `options` (default page size when absent).
	pub fn new(options: Option<PageOptions>, fetch: F) -> Self {
		Self { options: PageOptions::resolve(options), fetch, done: false }
	}

	/// Fetches the next page, or returns `None` once the listing is exhausted.
	///
	/// A failed fetch ends the walk.
	pub async fn next_page(&mut self) -> Option<Result<(P, Response)>> {
		if self.done {
			return None;
		}

		let result = (self.fetch)(self.options).await;

		match &result {
			Ok((page, _)) => {
				obs::log_page(page.offset(), page.size(), page.total());

				if page.is_last() {
					self.done = true;
				} else {
					self.options.offset = page.next_offset();
				}
			},
			Err(_) => self.done = true,
		}

		Some(result)
	}

	/// Walks the remaining pages, accumulating their items.
	pub async fn collect(mut self) -> Result<Listing<P::Item>, PartialListing<P::Item>> {
		let mut listing = Listing { items: Vec::new(), pages: 0, last_response: None };

		while let Some(result) = self.next_page().await {
			match result {
				Ok((page, response)) => {
					listing.items.extend(page.into_items());
					listing.pages += 1;
					listing.last_response = Some(response);
				},
				Err(error) => {
					return Err(PartialListing { items: mem::take(&mut listing.items), error });
				},
			}
		}

		Ok(listing)
	}
}

/// Collects every page of a listing into one [`Listing`].
pub async fn collect_pages<F, Fut, P>(
	options: Option<PageOptions>,
	fetch: F,
) -> Result<Listing<P::Item>, PartialListing<P::Item>>
where
	F: FnMut(PageOptions) -> Fut,
	Fut: Future<Output = Result<(P, Response)>>,
	P: PageEnvelope,
{
	Paginator::new(options, fetch).collect().await
}
