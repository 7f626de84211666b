//! Shared HTTP transport for token, record, and trigger calls.
//!
//! One [`HttpConnector`] backs every outbound request in an invocation so connection pooling
//! and the per-call timeout apply uniformly. The connector also implements the `oauth2`
//! crate's [`AsyncHttpClient`] so the client-credentials exchange rides the same transport.

// std
use std::ops::Deref;
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
// self
use crate::{_prelude::*, error::ConfigError};

/// Bounded timeout applied to every outbound call. Not a correctness requirement, only a
/// safety margin against a hung backend.
const CALL_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Token requests should not follow redirects, matching OAuth 2.0 guidance that token
/// endpoints return results directly instead of delegating to another URI. Configure any
/// custom [`ReqwestClient`] accordingly before handing it to [`HttpConnector::with_client`].
#[derive(Clone)]
pub struct HttpConnector(ReqwestClient);
impl HttpConnector {
	/// Builds the relay's default connector with the call timeout applied and redirect
	/// following disabled.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.timeout(CALL_TIMEOUT)
			.build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
impl AsRef<ReqwestClient> for HttpConnector {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for HttpConnector {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl Debug for HttpConnector {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("HttpConnector(..)")
	}
}
impl<'c> AsyncHttpClient<'c> for HttpConnector {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
