//! Invocation orchestration: one token, one full record scan, one trigger per match.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenProvider},
	config::RelayConfig,
	fhir::RecordClient,
	http::HttpConnector,
	obs::{self, Stage, StageOutcome, StageSpan},
	webhook::WebhookDispatcher,
};

/// Resource type scanned by every invocation.
const PATIENT_RESOURCE: &str = "Patient";

/// Aggregate outcome of one relay invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RelayReport {
	/// Patients inspected across every page.
	pub patients: usize,
	/// Scenario triggers spawned for matched contact addresses.
	pub triggered: usize,
}

/// Drives one end-to-end invocation against the configured backends.
///
/// Flow: acquire the access token once, stream every patient page in order, extract the
/// contact address per record, and spawn one independent trigger dispatch per match. There
/// is no deduplication and no high-water mark—every invocation re-scans the entire record
/// set.
#[derive(Clone, Debug)]
pub struct Relay {
	config: RelayConfig,
	http: HttpConnector,
}
impl Relay {
	/// Builds the relay and its shared HTTP connector.
	pub fn new(config: RelayConfig) -> Result<Self> {
		Ok(Self { http: HttpConnector::new()?, config })
	}

	/// Wires the relay onto an existing connector (tests use this to customize TLS).
	pub fn with_connector(config: RelayConfig, http: HttpConnector) -> Self {
		Self { config, http }
	}

	/// Runs one invocation and reports the aggregate result.
	///
	/// Token acquisition and page fetches are fatal; dispatch outcomes are fire-and-forget
	/// by contract—each runs as its own task, failures are logged, and none of them can
	/// abort the batch or the invocation.
	pub async fn run(&self) -> Result<RelayReport> {
		let span = StageSpan::new(Stage::Scan, "run");

		obs::record_stage(Stage::Scan, StageOutcome::Attempt);

		let result = span
			.instrument(async {
				let token = self.acquire_token().await?;
				let records =
					RecordClient::new(self.http.clone(), self.config.fhir_base.clone(), &token);
				let dispatcher =
					Arc::new(WebhookDispatcher::new(self.http.clone(), &self.config));
				let mut stream = records.search(PATIENT_RESOURCE).map_err(Error::from)?;
				let mut report = RelayReport::default();

				while let Some(patient) = stream.try_next().await.map_err(Error::from)? {
					report.patients += 1;

					let Some(address) = patient.extension_value(&self.config.extension_url)
					else {
						continue;
					};

					spawn_dispatch(&dispatcher, patient.id.clone(), address.to_owned());

					report.triggered += 1;
				}

				Ok(report)
			})
			.await;

		match &result {
			Ok(_) => obs::record_stage(Stage::Scan, StageOutcome::Success),
			Err(_) => obs::record_stage(Stage::Scan, StageOutcome::Failure),
		}

		result
	}

	async fn acquire_token(&self) -> Result<AccessToken> {
		obs::record_stage(Stage::Token, StageOutcome::Attempt);

		let acquired = TokenProvider::new(&self.config, self.http.clone()).acquire().await;

		match &acquired {
			Ok(_) => obs::record_stage(Stage::Token, StageOutcome::Success),
			Err(_) => obs::record_stage(Stage::Token, StageOutcome::Failure),
		}

		Ok(acquired?)
	}
}

// Fire-and-forget by contract: the orchestrator never observes the dispatch result.
fn spawn_dispatch(dispatcher: &Arc<WebhookDispatcher>, record_id: String, address: String) {
	let dispatcher = Arc::clone(dispatcher);

	obs::record_stage(Stage::Dispatch, StageOutcome::Attempt);

	tokio::spawn(async move {
		match dispatcher.dispatch(&address).await {
			Ok(()) => obs::record_stage(Stage::Dispatch, StageOutcome::Success),
			Err(error) => {
				obs::record_stage(Stage::Dispatch, StageOutcome::Failure);
				obs::log_dropped_dispatch(&record_id, &error);
			},
		}
	});
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::config::Secret;

	fn config() -> RelayConfig {
		RelayConfig {
			authority: Url::parse("https://login.example.com/contoso")
				.expect("Authority fixture should parse."),
			audience: "https://fhir.example.com".into(),
			client_id: "relay-client".into(),
			client_secret: Secret::new("relay-secret"),
			fhir_base: Url::parse("https://fhir.example.com/base")
				.expect("Base fixture should parse."),
			trigger_uri: Url::parse("https://bot.example.com/api/trigger")
				.expect("Trigger fixture should parse."),
			trigger_secret: Secret::new("signing-secret"),
			tenant_name: "contoso-bot".into(),
			scenario_id: "screen".into(),
			extension_url: "address".into(),
		}
	}

	#[test]
	fn relay_debug_redacts_secrets() {
		let relay = Relay::new(config()).expect("Relay should build from a valid config.");
		let rendered = format!("{relay:?}");

		assert!(!rendered.contains("relay-secret"));
		assert!(!rendered.contains("signing-secret"));
	}
}
