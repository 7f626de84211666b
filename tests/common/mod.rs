// self
use scenario_relay::http::HttpConnector;

/// Builds a connector that accepts the self-signed certificates produced by `httpmock`
/// during tests.
pub fn insecure_connector() -> HttpConnector {
	let client = reqwest::Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure reqwest client for tests.");

	HttpConnector::with_client(client)
}
