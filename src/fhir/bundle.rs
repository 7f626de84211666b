//! Wire types for the paginated search bundle consumed by the relay.

// self
use crate::{_prelude::*, error::FetchError};

/// Bundle link relation that carries the cursor to the next result page.
const NEXT_RELATION: &str = "next";

/// Single `{url, value}` attachment on a patient record.
///
/// FHIR spells string-valued extensions as `valueString`; the relay accepts either spelling
/// and only ever reads the value as a string.
#[derive(Clone, Debug, Deserialize)]
pub struct Extension {
	/// Extension key.
	pub url: String,
	/// Extension value, when present and string-valued.
	#[serde(default, alias = "valueString")]
	pub value: Option<String>,
}

/// Patient resource trimmed to the fields the relay inspects.
///
/// Immutable once fetched; the stream hands out owned records and the orchestrator drops
/// each one after processing it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PatientRecord {
	/// Logical resource id.
	#[serde(default)]
	pub id: String,
	/// Ordered extension attachments, in stored order.
	#[serde(default, rename = "extension")]
	pub extensions: Vec<Extension>,
}
impl PatientRecord {
	/// Returns the first non-empty extension value stored under `url`.
	///
	/// First match wins when duplicate keys exist; absence is not an error.
	pub fn extension_value(&self, url: &str) -> Option<&str> {
		self.extensions
			.iter()
			.find(|extension| extension.url == url)
			.and_then(|extension| extension.value.as_deref())
			.filter(|value| !value.is_empty())
	}
}

/// One page of a paginated search response.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Bundle {
	/// Resources carried by this page.
	#[serde(default, rename = "entry")]
	pub entries: Vec<BundleEntry>,
	/// Page-level links, including the next-page cursor when more pages exist.
	#[serde(default, rename = "link")]
	pub links: Vec<BundleLink>,
}
impl Bundle {
	/// Opaque cursor to the next page; `None` exactly when the result set is exhausted.
	pub fn next_link(&self) -> Option<&str> {
		self.links
			.iter()
			.find(|link| link.relation == NEXT_RELATION)
			.map(|link| link.url.as_str())
	}

	pub(crate) fn parse(bytes: &[u8]) -> Result<Self, FetchError> {
		let mut deserializer = serde_json::Deserializer::from_slice(bytes);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| FetchError::BundleParse { source })
	}
}

/// Envelope wrapping each resource in a bundle page.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BundleEntry {
	/// The carried resource; entries without one are skipped.
	#[serde(default)]
	pub resource: Option<PatientRecord>,
}

/// Relation/URL pair in a bundle's link list.
#[derive(Clone, Debug, Deserialize)]
pub struct BundleLink {
	/// Link relation, e.g. `self` or `next`.
	pub relation: String,
	/// Link target.
	pub url: String,
}
