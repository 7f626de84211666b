//! FHIR record retrieval: wire types, authenticated search, and cursor pagination.

mod bundle;
mod client;

pub use bundle::*;
pub use client::*;
