//! Proactive health-bot trigger relay—authenticate against a FHIR server, walk every patient
//! record across all result pages, and start a scripted bot conversation for each contact
//! address found, one signed webhook per match.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod fhir;
pub mod http;
pub mod obs;
pub mod relay;
#[cfg(feature = "serve")] pub mod serve;
pub mod webhook;

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
#[cfg(feature = "serve")] use {anyhow as _, dotenvy as _, tracing_subscriber as _};
#[cfg(test)] use httpmock as _;
