//! HS256 trigger-token minting.

// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
// self
use crate::{_prelude::*, config::Secret, error::DispatchError};

type HmacSha256 = Hmac<Sha256>;

const HEADER: &[u8] = br#"{"alg":"HS256","typ":"JWT"}"#;

#[derive(Serialize)]
struct Claims<'a> {
	#[serde(rename = "tenantName")]
	tenant_name: &'a str,
	iat: i64,
}

/// Mints the health-bot trigger token.
///
/// The claim set is exactly `{"tenantName": <tenant>, "iat": <whole seconds since epoch>}`;
/// no `exp` claim is set, matching the contract the deployed bot endpoint verifies. Each
/// dispatch mints its own token, so `iat` always equals the dispatch time.
pub fn mint_trigger_token(
	secret: &Secret,
	tenant_name: &str,
	issued_at: OffsetDateTime,
) -> Result<String, DispatchError> {
	let claims = Claims { tenant_name, iat: issued_at.unix_timestamp() };
	let payload = serde_json::to_vec(&claims).map_err(|_| DispatchError::Signing)?;
	let signing_input =
		format!("{}.{}", URL_SAFE_NO_PAD.encode(HEADER), URL_SAFE_NO_PAD.encode(payload));
	let mut mac = HmacSha256::new_from_slice(secret.expose().as_bytes())
		.map_err(|_| DispatchError::Signing)?;

	mac.update(signing_input.as_bytes());

	let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

	Ok(format!("{signing_input}.{signature}"))
}
