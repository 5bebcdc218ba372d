//! Document content and doc/sheet metadata.

// self
use crate::{
	_prelude::*,
	api::Document,
	http::ApiHttpClient,
	request::{ApiRequest, Credential},
	transport::TransportErrorMapper,
};

const DOC: &str = "/open-apis/doc/v2";
const DOC_META: &str = "/open-apis/doc/v2/meta";
const SPREADSHEETS: &str = "/open-apis/sheet/v2/spreadsheets";

impl<C, M> Document<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches a document's plain-text content.
	pub async fn raw_content(&self, doc_token: &str, user_token: &str) -> Result<Vec<u8>> {
		let request = ApiRequest::get("document.raw_content", DOC)
			.segment(doc_token)
			.segment("raw_content")
			.credential(Credential::user(user_token));

		self.app.call(request).await
	}

	/// Fetches a spreadsheet's metadata.
	pub async fn sheet_meta(&self, spreadsheet_token: &str, user_token: &str) -> Result<Vec<u8>> {
		let request = ApiRequest::get("document.sheet_meta", SPREADSHEETS)
			.segment(spreadsheet_token)
			.segment("metainfo")
			.credential(Credential::user(user_token));

		self.app.call(request).await
	}

	/// Fetches a document's metadata.
	pub async fn doc_meta(&self, doc_token: &str, user_token: &str) -> Result<Vec<u8>> {
		let request = ApiRequest::get("document.doc_meta", DOC_META)
			.segment(doc_token)
			.credential(Credential::user(user_token));

		self.app.call(request).await
	}
}
