mod common;

// crates.io
use httpmock::prelude::*;
// self
use scenario_relay::{
	config::{RelayConfig, Secret},
	error::DispatchError,
	url::Url,
	webhook::WebhookDispatcher,
};

fn relay_config(server: &MockServer) -> RelayConfig {
	RelayConfig {
		authority: Url::parse(&server.url("/contoso"))
			.expect("Mock authority URL should parse successfully."),
		audience: "https://fhir.example.com".into(),
		client_id: "relay-client".into(),
		client_secret: Secret::new("relay-secret"),
		fhir_base: Url::parse(&server.url("/fhir"))
			.expect("Mock FHIR base URL should parse successfully."),
		trigger_uri: Url::parse(&server.url("/api/trigger"))
			.expect("Mock trigger URL should parse successfully."),
		trigger_secret: Secret::new("signing-secret"),
		tenant_name: "contoso-bot".into(),
		scenario_id: "screen".into(),
		extension_url: "address".into(),
	}
}

fn dispatcher(server: &MockServer) -> WebhookDispatcher {
	WebhookDispatcher::new(common::insecure_connector(), &relay_config(server))
}

#[tokio::test]
async fn dispatch_posts_the_literal_trigger_body() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/trigger")
				.header("accept", "application/json")
				.header("content-type", "application/json")
				.header_exists("authorization")
				.body("{\"address\":teams:abc,\"scenario\": \"/scenarios/screen\"}");
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;

	dispatcher(&server)
		.dispatch("teams:abc")
		.await
		.expect("Trigger dispatch should succeed.");

	mock.assert_async().await;
}

#[tokio::test]
async fn failing_endpoint_surfaces_a_dispatch_error() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/trigger");
			then.status(500);
		})
		.await;
	let err = dispatcher(&server)
		.dispatch("teams:abc")
		.await
		.expect_err("A failing trigger endpoint should surface to the direct caller.");

	assert!(matches!(err, DispatchError::Status { status: 500 }));

	mock.assert_async().await;
}
