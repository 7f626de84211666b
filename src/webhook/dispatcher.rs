//! Per-match scenario trigger calls against the health-bot endpoint.

// crates.io
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	config::{RelayConfig, Secret},
	error::DispatchError,
	http::HttpConnector,
	webhook::mint_trigger_token,
};

/// Issues one signed trigger call per matched contact address.
///
/// Each call mints a fresh trigger token and builds its own request; dispatchers share no
/// mutable state and may run concurrently.
#[derive(Clone, Debug)]
pub struct WebhookDispatcher {
	http: HttpConnector,
	trigger_uri: Url,
	trigger_secret: Secret,
	tenant_name: String,
	scenario_id: String,
}
impl WebhookDispatcher {
	/// Binds the dispatcher to the invocation's trigger settings.
	pub fn new(http: HttpConnector, config: &RelayConfig) -> Self {
		Self {
			http,
			trigger_uri: config.trigger_uri.clone(),
			trigger_secret: config.trigger_secret.clone(),
			tenant_name: config.tenant_name.clone(),
			scenario_id: config.scenario_id.clone(),
		}
	}

	/// Posts one scenario trigger for `address`.
	///
	/// The call is independent of any other dispatch; a failure here must not abort
	/// processing of other records.
	pub async fn dispatch(&self, address: &str) -> Result<(), DispatchError> {
		let token = mint_trigger_token(
			&self.trigger_secret,
			&self.tenant_name,
			OffsetDateTime::now_utc(),
		)?;
		let response = self
			.http
			.post(self.trigger_uri.clone())
			.header(AUTHORIZATION, format!("Bearer {token}"))
			.header(ACCEPT, "application/json")
			.header(CONTENT_TYPE, "application/json")
			.body(self.trigger_body(address))
			.send()
			.await?;
		let status = response.status();

		if !status.is_success() {
			return Err(DispatchError::Status { status: status.as_u16() });
		}

		Ok(())
	}

	// The address value is inserted verbatim, without JSON quoting or escaping; the deployed
	// bot endpoint expects this exact byte layout.
	fn trigger_body(&self, address: &str) -> String {
		format!(r#"{{"address":{address},"scenario": "/scenarios/{}"}}"#, self.scenario_id)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn dispatcher() -> WebhookDispatcher {
		WebhookDispatcher {
			http: HttpConnector::with_client(ReqwestClient::new()),
			trigger_uri: Url::parse("https://bot.example.com/api/trigger")
				.expect("Trigger URI fixture should parse."),
			trigger_secret: Secret::new("signing-secret"),
			tenant_name: "contoso-bot".into(),
			scenario_id: "screen".into(),
		}
	}

	#[test]
	fn trigger_body_is_byte_exact() {
		assert_eq!(
			dispatcher().trigger_body("teams:abc"),
			r#"{"address":teams:abc,"scenario": "/scenarios/screen"}"#,
		);
	}
}
