//! Lists every domain and one domain's aliases against a local mock of the administration API,
//! then creates an alias, walking the paginated listing the same way a production client would.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use emailsrvr::{
	client::{Client, ClientConfig},
	context::CallContext,
	limit::RateLimit,
	pagination::PageOptions,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let first_page = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/domains").query_param("offset", "0");
			then.status(200).header("content-type", "application/json").body(
				"{\"offset\":0,\"size\":2,\"total\":3,\"domains\":[{\"name\":\"acme.test\",\"serviceType\":\"rsemail\"},{\"name\":\"globex.test\",\"serviceType\":\"exchange\"}]}",
			);
		})
		.await;
	let second_page = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/domains").query_param("offset", "2");
			then.status(200).header("content-type", "application/json").body(
				"{\"offset\":2,\"size\":2,\"total\":3,\"domains\":[{\"name\":\"initech.test\",\"serviceType\":\"rsemail\"}]}",
			);
		})
		.await;
	let aliases = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/domains/acme.test/rs/aliases");
			then.status(200).header("content-type", "application/json").body(
				"{\"offset\":0,\"size\":50,\"total\":1,\"aliases\":[{\"name\":\"sales\",\"numberOfMembers\":2}]}",
			);
		})
		.await;
	let add = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/domains/acme.test/rs/aliases/support");
			then.status(200);
		})
		.await;
	let config: ClientConfig = serde_json::from_value(serde_json::json!({
		"base_url": server.base_url(),
		"credentials": { "user_key": "demo-user", "secret_key": "demo-secret" },
	}))?;
	let client = Client::builder()
		.config(config)
		.read_limit(RateLimit::new(10., 2))
		.build()?;
	let ctx = CallContext::new().with_timeout(std::time::Duration::from_secs(10));
	let domains = client.domains().index(&ctx, Some(PageOptions::with_size(2))).await?;

	for domain in &domains.items {
		println!("{} ({})", domain.name, domain.service_type);
	}

	let listing = client.aliases().index(&ctx, None, "acme.test").await?;

	for alias in listing.items {
		println!("acme.test alias {} has {} members.", alias.name, alias.number_of_members);
	}

	client
		.aliases()
		.add(&ctx, "acme.test", "support", &["alice@acme.test", "bob@acme.test"])
		.await?;

	first_page.assert_async().await;
	second_page.assert_async().await;
	aliases.assert_async().await;
	add.assert_async().await;

	Ok(())
}
