// self
use crate::{_prelude::*, error::DispatchError, obs::Stage};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedStage<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedStage<F> = F;

/// A span builder used by relay stages.
#[derive(Clone, Debug)]
pub struct StageSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl StageSpan {
	/// Creates a new span tagged with the provided stage + call site.
	pub fn new(stage: Stage, site: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("scenario_relay.stage", stage = stage.as_str(), site);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (stage, site);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedStage<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs a dispatch failure that the orchestrator drops by contract.
pub fn log_dropped_dispatch(record_id: &str, error: &DispatchError) {
	#[cfg(feature = "tracing")]
	tracing::warn!(record_id, %error, "Scenario trigger dispatch failed; continuing the batch.");

	#[cfg(not(feature = "tracing"))]
	{
		let _ = (record_id, error);
	}
}
