//! Rackspace Email aliases: listing, lookup, creation, removal.

// crates.io
use http::Method;
// self
use crate::{
	_prelude::*,
	client::Client,
	context::CallContext,
	error::ArgError,
	pagination::{self, Listing, PageEnvelope, PageOptions, PartialListing},
	resources,
	response::Response,
	transport::HttpTransport,
};

/// Form field carrying the comma-joined member list on alias creation.
pub const ALIAS_EMAILS_FIELD: &str = "aliasEmails";

/// Alias summary as returned by the listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Alias {
	/// Local part of the alias address.
	pub name: String,
	/// Number of member addresses.
	pub number_of_members: u32,
}

/// Alias with its member addresses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AliasDetails {
	/// Local part of the alias address.
	pub name: String,
	/// Member addresses.
	pub email_address_list: EmailAddressList,
}
impl AliasDetails {
	/// Member addresses mail to the alias is forwarded to.
	pub fn addresses(&self) -> &[String] {
		&self.email_address_list.addresses
	}
}

/// Wrapper object the API uses for alias members.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailAddressList {
	/// Member addresses.
	#[serde(rename = "emailAddress")]
	pub addresses: Vec<String>,
}

/// One page of an alias listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AliasPage {
	/// Offset applied by the service.
	pub offset: u32,
	/// Page size applied by the service.
	pub size: u32,
	/// Total number of aliases in the domain.
	pub total: u32,
	/// Aliases on this page.
	pub aliases: Vec<Alias>,
}
impl PageEnvelope for AliasPage {
	type Item = Alias;

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
		self.aliases
	}
}

/// Accessor for `v1/domains/{domain}/rs/aliases`.
pub struct Aliases<'a, C>
where
	C: ?Sized + HttpTransport,
{
	client: &'a Client<C>,
}
impl<C> Aliases<'_, C>
where
	C: ?Sized + HttpTransport,
{
	/// Fetches a single listing page for `domain`.
	pub async fn fetch_page(
		&self,
		ctx: &CallContext,
		options: PageOptions,
		domain: &str,
	) -> Result<(AliasPage, Response)> {
		let path = aliases_path(domain)?;
		let request = self.client.new_request(Method::GET, &options.append_to(&path), None)?;

		self.client.send_json(ctx, request).await
	}

	/// Lists every alias of `domain`.
	pub async fn index(
		&self,
		ctx: &CallContext,
		options: Option<PageOptions>,
		domain: &str,
	) -> Result<Listing<Alias>, PartialListing<Alias>> {
		if let Err(e) = aliases_path(domain) {
			return Err(PartialListing { items: Vec::new(), error: e.into() });
		}

		pagination::collect_pages(options, move |options| self.fetch_page(ctx, options, domain))
			.await
	}

	/// Looks up one alias and its members.
	pub async fn show(
		&self,
		ctx: &CallContext,
		domain: &str,
		alias: &str,
	) -> Result<(AliasDetails, Response)> {
		let path = alias_path(domain, alias)?;
		let request = self.client.new_request(Method::GET, &path, None)?;

		self.client.send_json(ctx, request).await
	}

	/// Creates `alias` forwarding to `addresses`.
	pub async fn add<S>(
		&self,
		ctx: &CallContext,
		domain: &str,
		alias: &str,
		addresses: &[S],
	) -> Result<Response>
	where
		S: AsRef<str>,
	{
		let path = alias_path(domain, alias)?;

		if addresses.is_empty() {
			return Err(ArgError::new("emailAddresses", "cannot be an empty list").into());
		}

		let members = addresses.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
		let form = BTreeMap::from([(ALIAS_EMAILS_FIELD.to_owned(), members)]);
		let request = self.client.new_request(Method::POST, &path, Some(&form))?;

		self.client.send(ctx, request).await
	}

	/// Removes `alias`.
	pub async fn delete(&self, ctx: &CallContext, domain: &str, alias: &str) -> Result<Response> {
		let path = alias_path(domain, alias)?;
		let request = self.client.new_request(Method::DELETE, &path, None)?;

		self.client.send(ctx, request).await
	}
}

impl<C> Client<C>
where
	C: ?Sized + HttpTransport,
{
	/// Rackspace Email alias operations.
	pub fn aliases(&self) -> Aliases<'_, C> {
		Aliases { client: self }
	}
}

fn aliases_path(domain: &str) -> Result<String, ArgError> {
	let domain = resources::path_segment("domain", domain)?;

	Ok(format!("v1/domains/{domain}/rs/aliases"))
}

fn alias_path(domain: &str, alias: &str) -> Result<String, ArgError> {
	let collection = aliases_path(domain)?;
	let alias = resources::path_segment("alias", alias)?;

	Ok(format!("{collection}/{alias}"))
}
