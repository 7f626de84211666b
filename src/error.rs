//! Relay-level error types shared across the configuration, token, record, and webhook layers.

// self
use crate::_prelude::*;

/// Relay-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical relay error exposed by public APIs.
///
/// `Config`, `Auth`, and `Fetch` are fatal for the invocation and surface at the trigger
/// boundary. `Dispatch` never reaches this level from the orchestrator—per-record trigger
/// failures are logged and dropped—but the variant exists for callers driving
/// [`WebhookDispatcher`](crate::webhook::WebhookDispatcher) directly.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Required configuration is missing or malformed.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Access-token acquisition failed.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// A record page could not be fetched.
	#[error(transparent)]
	Fetch(#[from] FetchError),
	/// A single scenario trigger failed.
	#[error(transparent)]
	Dispatch(#[from] DispatchError),
}

/// Configuration failures raised before any network call is made.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required setting is absent or empty.
	#[error("Required setting `{name}` is not set.")]
	MissingSetting {
		/// Environment variable name.
		name: &'static str,
	},
	/// A setting that must be a URL failed to parse.
	#[error("Setting `{name}` is not a valid URL.")]
	InvalidUrl {
		/// Environment variable name.
		name: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Token-acquisition failures; fatal for the invocation, never retried.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// The authority rejected the client credentials.
	#[error("Authority rejected the client credentials: {reason}.")]
	Rejected {
		/// Authority-supplied reason string.
		reason: String,
	},
	/// The token endpoint answered with something the relay could not interpret.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	UnexpectedResponse {
		/// Summary of the malformed response.
		message: String,
	},
	/// The configured authority cannot be turned into a token endpoint URL.
	#[error("Authority URL cannot be used as a token endpoint.")]
	InvalidAuthority {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// Network failure while reaching the authority.
	#[error("Network error occurred while calling the token endpoint.")]
	Transport {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl AuthError {
	/// Wraps a transport-specific network error.
	pub fn transport(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Transport { source: Box::new(src) }
	}
}

/// Record-page fetch failures; fatal to the remainder of the scan.
///
/// Records already yielded before the failure stand—triggers spawned for them are not
/// retracted.
#[derive(Debug, ThisError)]
pub enum FetchError {
	/// The record server answered a page request with a non-success status.
	#[error("Record search returned HTTP {status}.")]
	Status {
		/// HTTP status code of the failed page request.
		status: u16,
	},
	/// A page response was not a parseable resource bundle.
	#[error("Record search returned a malformed bundle.")]
	BundleParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// A page URL (search root or next link) failed to parse.
	#[error("Record page URL is invalid.")]
	InvalidPageUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Network failure while fetching a page.
	#[error("Network error occurred while fetching a record page.")]
	Transport(#[from] ReqwestError),
}

/// Scenario-trigger failures; isolated per record and never allowed to abort the batch.
#[derive(Debug, ThisError)]
pub enum DispatchError {
	/// The trigger endpoint answered with a non-success status.
	#[error("Trigger endpoint returned HTTP {status}.")]
	Status {
		/// HTTP status code of the failed trigger call.
		status: u16,
	},
	/// The trigger token could not be minted.
	#[error("Trigger token could not be signed.")]
	Signing,
	/// Network failure while posting the trigger.
	#[error("Network error occurred while calling the trigger endpoint.")]
	Transport(#[from] ReqwestError),
}
