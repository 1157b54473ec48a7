// crates.io
use httpmock::prelude::*;
// self
use emailsrvr::{
	_preludet::*,
	StatusCode,
	client::MEDIA_TYPE_FORM,
	context::CallContext,
	error::ArgError,
	pagination::PageOptions,
	resources::Alias,
};

#[tokio::test]
async fn index_lists_aliases_across_pages() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url())
		.expect("Test client should build for the alias listing test.");
	let first = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/domains/foo.com/rs/aliases").query_param("offset", "0");
			then.status(200).body(
				"{\"offset\": 0, \"size\": 1, \"total\": 2, \"aliases\": [{\"name\":\"foo\",\"numberOfMembers\":2}]}",
			);
		})
		.await;
	let second = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/domains/foo.com/rs/aliases").query_param("offset", "1");
			then.status(200).body(
				"{\"offset\": 1, \"size\": 1, \"total\": 2, \"aliases\": [{\"name\":\"bar\",\"numberOfMembers\":1}]}",
			);
		})
		.await;
	let listing = client
		.aliases()
		.index(&CallContext::new(), Some(PageOptions::with_size(1)), "foo.com")
		.await
		.expect("Alias listing should succeed.");

	assert_eq!(
		listing.into_items(),
		[
			Alias { name: "foo".into(), number_of_members: 2 },
			Alias { name: "bar".into(), number_of_members: 1 },
		]
	);

	first.assert_calls_async(1).await;
	second.assert_calls_async(1).await;
}

#[tokio::test]
async fn show_returns_members() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url())
		.expect("Test client should build for the alias show test.");
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/domains/foo.com/rs/aliases/bar");
			then.status(200).body(
				"{\"name\": \"bar\", \"emailAddressList\": {\"emailAddress\": [\"baz@bar.com\", \"qux@bar.com\"]}}",
			);
		})
		.await;
	let (alias, _) = client
		.aliases()
		.show(&CallContext::new(), "foo.com", "bar")
		.await
		.expect("Alias lookup should succeed.");

	assert_eq!(alias.name, "bar");
	assert_eq!(alias.addresses(), ["baz@bar.com", "qux@bar.com"]);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn add_posts_form_encoded_members() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url())
		.expect("Test client should build for the alias add test.");
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v1/domains/foo.com/rs/aliases/bar")
				.header("content-type", MEDIA_TYPE_FORM)
				.body("aliasEmails=foo%40bar.com%2Cbaz%40bar.com");
			then.status(200);
		})
		.await;
	let response = client
		.aliases()
		.add(&CallContext::new(), "foo.com", "bar", &["foo@bar.com", "baz@bar.com"])
		.await
		.expect("Alias creation should succeed.");

	assert_eq!(response.status, StatusCode::OK);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn add_surfaces_conflicts() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url())
		.expect("Test client should build for the alias conflict test.");
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/domains/foo.com/rs/aliases/bar");
			then.status(409).body("{\"message\":\"Alias already exists\"}");
		})
		.await;
	let err = client
		.aliases()
		.add(&CallContext::new(), "foo.com", "bar", &["foo@bar.com"])
		.await
		.expect_err("Conflicts should surface as API errors.");

	assert_eq!(
		err.as_api().map(|api| (api.status(), api.message.as_str())),
		Some((StatusCode::CONFLICT, "Alias already exists"))
	);
}

#[tokio::test]
async fn delete_issues_delete() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url())
		.expect("Test client should build for the alias delete test.");
	let mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/v1/domains/foo.com/rs/aliases/bar");
			then.status(200);
		})
		.await;

	client
		.aliases()
		.delete(&CallContext::new(), "foo.com", "bar")
		.await
		.expect("Alias removal should succeed.");

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn invalid_arguments_never_reach_server() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url())
		.expect("Test client should build for the alias argument test.");
	let mock = server
		.mock_async(|when, then| {
			when.any_request();
			then.status(200);
		})
		.await;
	let ctx = CallContext::new();
	let aliases = client.aliases();
	let no_members: &[&str] = &[];
	let err = aliases
		.add(&ctx, "foo.com", "bar", no_members)
		.await
		.expect_err("Empty member lists should be rejected.");

	assert!(matches!(err, Error::Arg(ArgError { argument: "emailAddresses", .. })));
	assert_eq!(
		err.to_string(),
		"`emailAddresses` is invalid because it cannot be an empty list."
	);

	let err = aliases.show(&ctx, "", "bar").await.expect_err("Empty domains should be rejected.");

	assert!(matches!(err, Error::Arg(ArgError { argument: "domain", .. })));

	let partial =
		aliases.index(&ctx, None, "").await.expect_err("Empty domains should be rejected.");

	assert!(matches!(partial.error, Error::Arg(ArgError { argument: "domain", .. })));

	mock.assert_calls_async(0).await;
}
