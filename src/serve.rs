//! HTTP hosting surface for the invocation trigger.
//!
//! One route, `GET|POST /api/trigger-scenario`, runs a full relay invocation per request:
//! `200 OK` with the aggregate report on success, `502` when the authority or the record
//! server fails, `500` on configuration problems.

// crates.io
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
// self
use crate::{
	_prelude::*,
	relay::{Relay, RelayReport},
};

/// Response body returned by the trigger route.
#[derive(Clone, Debug, Serialize)]
pub struct TriggerResponse {
	/// `"ok"` or `"error"`.
	pub status: &'static str,
	/// Aggregate report, present on success.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub report: Option<RelayReport>,
	/// Error rendering, present on failure.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

/// Builds the trigger router backed by `relay`.
pub fn router(relay: Relay) -> Router {
	Router::new()
		.route("/api/trigger-scenario", get(trigger).post(trigger))
		.with_state(Arc::new(relay))
}

async fn trigger(State(relay): State<Arc<Relay>>) -> (StatusCode, Json<TriggerResponse>) {
	match relay.run().await {
		Ok(report) => (
			StatusCode::OK,
			Json(TriggerResponse { status: "ok", report: Some(report), error: None }),
		),
		Err(error) => {
			tracing::error!(%error, "Relay invocation failed.");

			(
				status_for(&error),
				Json(TriggerResponse {
					status: "error",
					report: None,
					error: Some(error.to_string()),
				}),
			)
		},
	}
}

// Configuration problems are the host's fault; everything else is an upstream failure.
fn status_for(error: &Error) -> StatusCode {
	match error {
		Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
		_ => StatusCode::BAD_GATEWAY,
	}
}
