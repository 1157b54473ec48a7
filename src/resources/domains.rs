//! Domains: paginated listing and single-domain lookup.

// crates.io
use http::Method;
// self
use crate::{
	_prelude::*,
	client::Client,
	context::CallContext,
	pagination::{self, Listing, PageEnvelope, PageOptions, PartialListing},
	resources,
	response::Response,
	transport::HttpTransport,
};

const DOMAINS_PATH: &str = "v1/domains";

/// A hosted domain and its service allocations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Domain {
	/// Domain name.
	pub name: String,
	/// Account the domain belongs to.
	pub account_number: String,
	/// Hosted service type (for example `rsemail` or `exchange`).
	pub service_type: String,
	/// ActiveSync licenses assigned.
	pub active_sync_licenses: u32,
	/// Whether ActiveSync mobile service is enabled.
	pub active_sync_mobile_service_enabled: bool,
	/// Whether mail archiving is enabled.
	pub archiving_service_enabled: bool,
	/// BlackBerry licenses assigned.
	pub black_berry_licenses: u32,
	/// Whether BlackBerry mobile service is enabled.
	pub black_berry_mobile_service_enabled: bool,
	/// Extra Exchange storage purchased, in MB.
	pub exchange_extra_storage: u64,
	/// Exchange mailbox allowance.
	pub exchange_max_num_mailboxes: u32,
	/// Exchange storage in use, in MB.
	pub exchange_used_storage: u64,
	/// Base Rackspace Email mailbox size, in MB.
	pub rs_email_base_mailbox_size: u64,
	/// Extra Rackspace Email storage purchased, in MB.
	pub rs_email_extra_storage: u64,
	/// Rackspace Email mailbox allowance.
	pub rs_email_max_number_mailboxes: u32,
	/// Rackspace Email storage in use, in MB.
	pub rs_email_used_storage: u64,
}

/// One page of the domain listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DomainPage {
	/// Offset applied by the service.
	pub offset: u32,
	/// Page size applied by the service.
	pub size: u32,
	/// Total number of domains.
	pub total: u32,
	/// Domains on this page.
	pub domains: Vec<Domain>,
}
impl PageEnvelope for DomainPage {
	type Item = Domain;

	fn offset(&self) -> u32 {
		self.offset
	}

	fn size(&self) -> u32 {
		self.size
	}

	fn total(&self) -> u32 {
		self.total
	}

	fn into_items(self) -> Vec<Self::Item> {
		self.domains
	}
}

#[derive(Deserialize)]
struct DomainRoot {
	domain: Domain,
}

/// Accessor for `v1/domains`.
pub struct Domains<'a, C>
where
	C: ?Sized + HttpTransport,
{
	client: &'a Client<C>,
}
impl<C> Domains<'_, C>
where
	C: ?Sized + HttpTransport,
{
	/// Fetches a single listing page.
	///
	/// Pair with [`Paginator`](crate::pagination::Paginator) to walk pages lazily.
	pub async fn fetch_page(
		&self,
		ctx: &CallContext,
		options: PageOptions,
	) -> Result<(DomainPage, Response)> {
		let request = self.client.new_request(Method::GET, &options.append_to(DOMAINS_PATH), None)?;

		self.client.send_json(ctx, request).await
	}

	/// Lists every domain, following pages until the reported total is covered.
	pub async fn index(
		&self,
		ctx: &CallContext,
		options: Option<PageOptions>,
	) -> Result<Listing<Domain>, PartialListing<Domain>> {
		pagination::collect_pages(options, move |options| self.fetch_page(ctx, options)).await
	}

	/// Looks up one domain by name.
	pub async fn show(&self, ctx: &CallContext, name: &str) -> Result<(Domain, Response)> {
		let name = resources::path_segment("name", name)?;
		let request =
			self.client.new_request(Method::GET, &format!("{DOMAINS_PATH}/{name}"), None)?;
		let (root, response) = self.client.send_json::<DomainRoot>(ctx, request).await?;

		Ok((root.domain, response))
	}
}

impl<C> Client<C>
where
	C: ?Sized + HttpTransport,
{
	/// Domain operations.
	pub fn domains(&self) -> Domains<'_, C> {
		Domains { client: self }
	}
}
