mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use scenario_relay::{
	config::{RelayConfig, Secret},
	error::Error,
	relay::Relay,
	url::Url,
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

fn relay(server: &MockServer) -> Relay {
	Relay::with_connector(relay_config(server), common::insecure_connector())
}

fn patient(id: &str, address: Option<&str>) -> serde_json::Value {
	match address {
		Some(address) => json!({
			"resource": {
				"id": id,
				"extension": [{"url": "address", "valueString": address}],
			}
		}),
		None => json!({"resource": {"id": id}}),
	}
}

fn bundle(entries: Vec<serde_json::Value>, next: Option<String>) -> String {
	let mut links = vec![json!({"relation": "self", "url": "https://fhir.example.com/Patient"})];

	if let Some(next) = next {
		links.push(json!({"relation": "next", "url": next}));
	}

	json!({"resourceType": "Bundle", "entry": entries, "link": links}).to_string()
}

async fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST).path("/contoso/oauth2/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"fhir-access\",\"token_type\":\"bearer\",\"expires_in\":3599}",
			);
		})
		.await
}

// Dispatches are spawned without being awaited, so give them a moment to land before
// asserting the exact call count.
async fn wait_for_calls(mock: &httpmock::Mock<'_>, expected: usize) {
	for _ in 0..100 {
		if mock.hits_async().await >= expected {
			break;
		}

		tokio::time::sleep(std::time::Duration::from_millis(20)).await;
	}

	mock.assert_calls_async(expected).await;
}

#[tokio::test]
async fn full_scan_triggers_each_matched_contact() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server).await;
	let first_page = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/fhir/Patient")
				.query_param("_format", "json")
				.header("authorization", "Bearer fhir-access");
			then.status(200).header("content-type", "application/json").body(bundle(
				vec![patient("p1", Some("teams:alice")), patient("p2", None)],
				Some(server.url("/fhir/page2")),
			));
		})
		.await;
	let second_page = server
		.mock_async(|when, then| {
			when.method(GET).path("/fhir/page2").header("authorization", "Bearer fhir-access");
			then.status(200)
				.header("content-type", "application/json")
				.body(bundle(vec![patient("p3", Some("teams:bob"))], None));
		})
		.await;
	let trigger = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/trigger").header_exists("authorization");
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let report = relay(&server).run().await.expect("Full scan should succeed.");

	assert_eq!(report.patients, 3);
	assert_eq!(report.triggered, 2);

	token.assert_async().await;
	first_page.assert_async().await;
	second_page.assert_async().await;
	wait_for_calls(&trigger, 2).await;
}

#[tokio::test]
async fn later_page_failure_keeps_earlier_dispatches() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server).await;
	let _first_page = server
		.mock_async(|when, then| {
			when.method(GET).path("/fhir/Patient");
			then.status(200).header("content-type", "application/json").body(bundle(
				vec![patient("p1", Some("teams:alice"))],
				Some(server.url("/fhir/page2")),
			));
		})
		.await;
	let second_page = server
		.mock_async(|when, then| {
			when.method(GET).path("/fhir/page2");
			then.status(500);
		})
		.await;
	let trigger = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/trigger");
			then.status(200);
		})
		.await;
	let err = relay(&server)
		.run()
		.await
		.expect_err("A failing page should fail the invocation.");

	assert!(matches!(err, Error::Fetch(_)));

	second_page.assert_async().await;
	wait_for_calls(&trigger, 1).await;
}

#[tokio::test]
async fn token_failure_aborts_before_any_record_fetch() {
	let server = MockServer::start_async().await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/contoso/oauth2/token");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_client\"}");
		})
		.await;
	let records = server
		.mock_async(|when, then| {
			when.method(GET).path("/fhir/Patient");
			then.status(200).header("content-type", "application/json").body(bundle(vec![], None));
		})
		.await;
	let err = relay(&server)
		.run()
		.await
		.expect_err("A rejected token exchange should fail the invocation.");

	assert!(matches!(err, Error::Auth(_)));

	token.assert_async().await;
	records.assert_calls_async(0).await;
}

#[tokio::test]
async fn dispatch_failures_never_abort_the_batch() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server).await;
	let _page = server
		.mock_async(|when, then| {
			when.method(GET).path("/fhir/Patient");
			then.status(200).header("content-type", "application/json").body(bundle(
				vec![patient("p1", Some("teams:alice")), patient("p2", Some("teams:bob"))],
				None,
			));
		})
		.await;
	let trigger = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/trigger");
			then.status(500);
		})
		.await;
	let report = relay(&server)
		.run()
		.await
		.expect("Dispatch failures must not fail the invocation.");

	assert_eq!(report.patients, 2);
	assert_eq!(report.triggered, 2);

	wait_for_calls(&trigger, 2).await;
}
