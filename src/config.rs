//! Invocation configuration, read from the process environment exactly once.
//!
//! Every setting the relay needs is collected into [`RelayConfig`] before the first network
//! call; no component performs its own environment lookups. Secrets are wrapped in
//! [`Secret`] so they stay out of logs and `Debug` output.

// std
use std::env;
// self
use crate::{_prelude::*, error::ConfigError};

/// Extension URL scanned for contact addresses when no override is configured.
pub const DEFAULT_ADDRESS_EXTENSION: &str = "address";

/// Redacted secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);
impl Secret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for Secret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Settings consumed by one relay invocation.
///
/// Variable names match the original deployment surface; [`RelayConfig::from_env`] fails on
/// the first missing or malformed value, before any network call.
#[derive(Clone, Debug)]
pub struct RelayConfig {
	/// OAuth 2.0 authority issuing the records-API token (`FHIR_Authority`).
	pub authority: Url,
	/// Audience the token is requested for, sent as the `resource` form parameter
	/// (`FHIR_Audience`).
	pub audience: String,
	/// Client identifier for the client-credentials grant (`FHIR_ClientId`).
	pub client_id: String,
	/// Client secret for the client-credentials grant (`FHIR_ClientSecret`).
	pub client_secret: Secret,
	/// Base URL of the FHIR server (`FHIR_URL`).
	pub fhir_base: Url,
	/// Health-bot scenario trigger endpoint (`Healthbot_Trigger_Uri`).
	pub trigger_uri: Url,
	/// Shared secret signing every trigger token (`Healthbot_API_JWT_SECRET`).
	pub trigger_secret: Secret,
	/// Bot tenant name embedded in every trigger token (`Healthbot_Name`).
	pub tenant_name: String,
	/// Scenario identifier started by each trigger (`Healthbot_ScenarioId`).
	pub scenario_id: String,
	/// Extension URL carrying the contact address (`FHIR_AddressExtension`, optional,
	/// defaults to [`DEFAULT_ADDRESS_EXTENSION`]).
	pub extension_url: String,
}
impl RelayConfig {
	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| env::var(name).ok())
	}

	/// Reads the configuration through an arbitrary lookup function.
	///
	/// Empty values count as missing, matching how the deployment surfaces unset app
	/// settings.
	pub fn from_lookup(
		lookup: impl Fn(&str) -> Option<String>,
	) -> Result<Self, ConfigError> {
		let required = |name: &'static str| {
			lookup(name)
				.filter(|value| !value.is_empty())
				.ok_or(ConfigError::MissingSetting { name })
		};
		let required_url = |name: &'static str| {
			required(name).and_then(|raw| {
				Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { name, source })
			})
		};

		Ok(Self {
			authority: required_url("FHIR_Authority")?,
			audience: required("FHIR_Audience")?,
			client_id: required("FHIR_ClientId")?,
			client_secret: Secret::new(required("FHIR_ClientSecret")?),
			fhir_base: required_url("FHIR_URL")?,
			trigger_uri: required_url("Healthbot_Trigger_Uri")?,
			trigger_secret: Secret::new(required("Healthbot_API_JWT_SECRET")?),
			tenant_name: required("Healthbot_Name")?,
			scenario_id: required("Healthbot_ScenarioId")?,
			extension_url: lookup("FHIR_AddressExtension")
				.filter(|value| !value.is_empty())
				.unwrap_or_else(|| DEFAULT_ADDRESS_EXTENSION.into()),
		})
	}
}
