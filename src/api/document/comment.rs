//! Whole-document comments.

// self
use crate::{
	_prelude::*,
	api::Document,
	http::ApiHttpClient,
	request::{ApiRequest, Credential},
	transport::TransportErrorMapper,
};

const ADD_WHOLE: &str = "/open-apis/comment/add_whole";

impl<C, M> Document<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Adds a whole-document comment.
	pub async fn add_whole_comment<T>(&self, payload: &T, user_token: &str) -> Result<Vec<u8>>
	where
		T: ?Sized + Serialize,
	{
		let request = ApiRequest::post("document.add_whole_comment", ADD_WHOLE)
			.json(payload)?
			.credential(Credential::user(user_token));

		self.app.call(request).await
	}
}
