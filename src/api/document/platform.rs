//! Cross-document metadata and search.

// self
use crate::{
	_prelude::*,
	api::Document,
	http::ApiHttpClient,
	request::{ApiRequest, Credential},
	transport::TransportErrorMapper,
};

const DOCS_META: &str = "/open-apis/suite/docs-api/meta";
const SEARCH_OBJECT: &str = "/open-apis/suite/docs-api/search/object";

impl<C, M> Document<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches metadata for several docs at once.
	pub async fn docs_meta<T>(&self, payload: &T, user_token: &str) -> Result<Vec<u8>>
	where
		T: ?Sized + Serialize,
	{
		let request = ApiRequest::post("document.docs_meta", DOCS_META)
			.json(payload)?
			.credential(Credential::user(user_token));

		self.app.call(request).await
	}

	/// Searches the documents visible to the user.
	pub async fn search_object<T>(&self, payload: &T, user_token: &str) -> Result<Vec<u8>>
	where
		T: ?Sized + Serialize,
	{
		let request = ApiRequest::post("document.search_object", SEARCH_OBJECT)
			.json(payload)?
			.credential(Credential::user(user_token));

		self.app.call(request).await
	}
}
