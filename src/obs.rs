//! Optional observability helpers for relay stages.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `scenario_relay.stage` with the `stage`
//!   (relay phase) and `site` (call site) fields, plus a warning for every dropped dispatch
//!   failure.
//! - Enable `metrics` to increment the `scenario_relay_stage_total` counter for every
//!   attempt/success/failure, labeled by `stage` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Relay phases observed during an invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
	/// Client-credentials token acquisition.
	Token,
	/// Paginated record scan, extraction included.
	Scan,
	/// Per-match scenario trigger.
	Dispatch,
}
impl Stage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Stage::Token => "token",
			Stage::Scan => "scan",
			Stage::Dispatch => "dispatch",
		}
	}
}
impl Display for Stage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageOutcome {
	/// Entry to a stage.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure surfaced (or, for dispatch, dropped after logging).
	Failure,
}
impl StageOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StageOutcome::Attempt => "attempt",
			StageOutcome::Success => "success",
			StageOutcome::Failure => "failure",
		}
	}
}
impl Display for StageOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
