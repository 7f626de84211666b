//! Bearer-token material returned by the authority.

// self
use crate::{_prelude::*, config::Secret};

/// Bearer token authorizing records-API calls for one invocation.
///
/// The token is never persisted and never reused across invocations; the expiry instant is
/// carried for completeness but nothing re-checks it mid-scan, since an invocation holds the
/// token for far less than its lifetime.
#[derive(Clone, Debug)]
pub struct AccessToken {
	/// Redacted token material presented in `Authorization` headers.
	pub secret: Secret,
	/// Instant after which the authority no longer honors the token.
	pub expires_at: OffsetDateTime,
}
impl AccessToken {
	/// Formats the `Authorization` header value for this token.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.secret.expose())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn bearer_header_carries_the_raw_secret() {
		let token = AccessToken {
			secret: Secret::new("abc123"),
			expires_at: OffsetDateTime::UNIX_EPOCH,
		};

		assert_eq!(token.bearer(), "Bearer abc123");
	}

	#[test]
	fn debug_output_redacts_the_secret() {
		let token = AccessToken {
			secret: Secret::new("abc123"),
			expires_at: OffsetDateTime::UNIX_EPOCH,
		};

		assert!(!format!("{token:?}").contains("abc123"));
	}
}
