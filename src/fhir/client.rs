//! Authenticated record search with cursor-based pagination.

// std
use std::vec::IntoIter;
// crates.io
use reqwest::header::{ACCEPT, AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::FetchError,
	fhir::{Bundle, PatientRecord},
	http::HttpConnector,
};

/// Records-API client bound to one invocation's bearer token.
///
/// Every page request is decorated with `Authorization: Bearer <token>` explicitly—there is
/// no client-wide interception hook.
#[derive(Clone)]
pub struct RecordClient {
	http: HttpConnector,
	base: Url,
	bearer: String,
}
impl Debug for RecordClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RecordClient").field("base", &self.base).finish()
	}
}
impl RecordClient {
	/// Binds the client to the server base URL and the invocation's token.
	pub fn new(http: HttpConnector, base: Url, token: &AccessToken) -> Self {
		Self { http, base, bearer: token.bearer() }
	}

	/// Starts a lazy search over `resource_type` (e.g. `"Patient"`).
	///
	/// No request is issued until the first [`PatientStream::try_next`] call.
	pub fn search(&self, resource_type: &str) -> Result<PatientStream, FetchError> {
		Ok(PatientStream {
			http: self.http.clone(),
			bearer: self.bearer.clone(),
			pending: Vec::new().into_iter(),
			next: Some(search_url(&self.base, resource_type)?),
		})
	}
}

/// Lazy, finite, non-restartable sequence of patient records.
///
/// Records surface in page order, then in-page order. Page N+1 is only requested once page
/// N's entries are drained; a failed page fetch ends the sequence with [`FetchError`], and
/// records already yielded stand.
pub struct PatientStream {
	http: HttpConnector,
	bearer: String,
	pending: IntoIter<PatientRecord>,
	next: Option<Url>,
}
impl Debug for PatientStream {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PatientStream")
			.field("pending", &self.pending.len())
			.field("next", &self.next)
			.finish()
	}
}
impl PatientStream {
	/// Yields the next record, fetching further pages on demand. `Ok(None)` signals
	/// exhaustion.
	pub async fn try_next(&mut self) -> Result<Option<PatientRecord>, FetchError> {
		loop {
			if let Some(record) = self.pending.next() {
				return Ok(Some(record));
			}

			let Some(page_url) = self.next.take() else {
				return Ok(None);
			};
			let page = self.fetch_page(page_url).await?;

			self.next = page
				.next_link()
				.map(|link| {
					Url::parse(link).map_err(|source| FetchError::InvalidPageUrl { source })
				})
				.transpose()?;
			self.pending = page
				.entries
				.into_iter()
				.filter_map(|entry| entry.resource)
				.collect::<Vec<_>>()
				.into_iter();
		}
	}

	async fn fetch_page(&self, page_url: Url) -> Result<Bundle, FetchError> {
		let response = self
			.http
			.get(page_url)
			.header(AUTHORIZATION, self.bearer.as_str())
			.header(ACCEPT, "application/json")
			.send()
			.await?;
		let status = response.status();

		if !status.is_success() {
			return Err(FetchError::Status { status: status.as_u16() });
		}

		Bundle::parse(&response.bytes().await?)
	}
}

// The search root asks for JSON explicitly via `_format`, the way the records deployment
// configures its clients. The resource type extends the path only; query parameters already
// present on the base survive.
fn search_url(base: &Url, resource_type: &str) -> Result<Url, FetchError> {
	let mut search = base.clone();

	search
		.path_segments_mut()
		.map_err(|()| FetchError::InvalidPageUrl {
			source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
		})?
		.pop_if_empty()
		.push(resource_type);
	search.query_pairs_mut().append_pair("_format", "json");

	Ok(search)
}
