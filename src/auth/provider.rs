//! Client-credentials token acquisition against the configured authority.

// crates.io
use oauth2::{
	AuthType, ClientId, ClientSecret, RequestTokenError, TokenResponse, TokenUrl,
	basic::BasicClient,
};
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	config::{RelayConfig, Secret},
	error::AuthError,
	http::HttpConnector,
};

/// Token lifetime assumed when the authority omits `expires_in`. The token only has to
/// outlive the current invocation, so a short nominal window is enough.
const FALLBACK_LIFETIME: Duration = Duration::seconds(300);

/// Acquires the invocation's access token with the client-credentials grant.
///
/// The audience travels as the `resource` form parameter, the shape the records API's
/// authority expects. One provider acquires exactly one token; there is no cache and no
/// retry—failure here aborts the invocation.
#[derive(Clone)]
pub struct TokenProvider<'cfg> {
	config: &'cfg RelayConfig,
	http: HttpConnector,
}
impl<'cfg> TokenProvider<'cfg> {
	/// Binds the provider to the invocation's configuration and transport.
	pub fn new(config: &'cfg RelayConfig, http: HttpConnector) -> Self {
		Self { config, http }
	}

	/// Performs the client-credentials exchange and returns the bearer token.
	pub async fn acquire(&self) -> Result<AccessToken, AuthError> {
		let oauth_client = BasicClient::new(ClientId::new(self.config.client_id.clone()))
			.set_client_secret(ClientSecret::new(self.config.client_secret.expose().to_owned()))
			.set_token_uri(token_endpoint(&self.config.authority)?)
			.set_auth_type(AuthType::RequestBody);
		let response = oauth_client
			.exchange_client_credentials()
			.add_extra_param("resource", self.config.audience.as_str())
			.request_async(&self.http)
			.await
			.map_err(map_token_error)?;
		let lifetime = response
			.expires_in()
			.and_then(|value| Duration::try_from(value).ok())
			.unwrap_or(FALLBACK_LIFETIME);

		Ok(AccessToken {
			secret: Secret::new(response.access_token().secret().clone()),
			expires_at: OffsetDateTime::now_utc() + lifetime,
		})
	}
}
impl Debug for TokenProvider<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenProvider")
			.field("authority", &self.config.authority)
			.field("client_id", &self.config.client_id)
			.finish()
	}
}

// The authority itself is not the token endpoint; the exchange targets its
// `oauth2/token` path, as the records deployment's authority does.
fn token_endpoint(authority: &Url) -> Result<TokenUrl, AuthError> {
	let mut raw = authority.to_string();

	if !raw.ends_with('/') {
		raw.push('/');
	}

	raw.push_str("oauth2/token");

	TokenUrl::new(raw).map_err(|source| AuthError::InvalidAuthority { source })
}

fn map_token_error(
	err: RequestTokenError<
		oauth2::HttpClientError<ReqwestError>,
		oauth2::basic::BasicErrorResponse,
	>,
) -> AuthError {
	match err {
		RequestTokenError::ServerResponse(response) => {
			let mut reason = response.error().to_string();

			if let Some(description) = response.error_description() {
				reason = format!("{reason}: {description}");
			}

			AuthError::Rejected { reason }
		},
		RequestTokenError::Request(source) => AuthError::transport(source),
		RequestTokenError::Parse(source, _) =>
			AuthError::UnexpectedResponse { message: source.to_string() },
		RequestTokenError::Other(message) => AuthError::UnexpectedResponse { message },
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_endpoint_joins_the_oauth_path() {
		let bare = Url::parse("https://login.example.com/contoso")
			.expect("Authority fixture should parse.");
		let trailing = Url::parse("https://login.example.com/contoso/")
			.expect("Authority fixture should parse.");

		assert_eq!(
			token_endpoint(&bare).expect("Endpoint should derive from a bare authority.").as_str(),
			"https://login.example.com/contoso/oauth2/token",
		);
		assert_eq!(
			token_endpoint(&trailing)
				.expect("Endpoint should derive from a trailing-slash authority.")
				.as_str(),
			"https://login.example.com/contoso/oauth2/token",
		);
	}
}
