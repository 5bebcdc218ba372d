//! Asynchronous bulk imports and their task status.

// self
use crate::{
	_prelude::*,
	api::Contact,
	http::ApiHttpClient,
	request::{ApiRequest, Query},
	transport::TransportErrorMapper,
};

const DEPARTMENT_BATCH_ADD: &str = "/open-apis/contact/v2/department/batch_add";
const USER_BATCH_ADD: &str = "/open-apis/contact/v2/user/batch_add";
const TASK_GET: &str = "/open-apis/contact/v2/task/get";

impl<C, M> Contact<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Submits a department import; the response carries the task id.
	pub async fn department_batch_add<T>(&self, payload: &T) -> Result<Vec<u8>>
	where
		T: ?Sized + Serialize,
	{
		let request =
			ApiRequest::post("contact.department_batch_add", DEPARTMENT_BATCH_ADD).json(payload)?;

		self.app.call(request).await
	}

	/// Submits a user import; the response carries the task id.
	pub async fn user_batch_add<T>(&self, payload: &T) -> Result<Vec<u8>>
	where
		T: ?Sized + Serialize,
	{
		let request = ApiRequest::post("contact.user_batch_add", USER_BATCH_ADD).json(payload)?;

		self.app.call(request).await
	}

	/// Polls an import task.
	pub async fn task_get(&self, query: &Query) -> Result<Vec<u8>> {
		self.app.call(ApiRequest::get("contact.task_get", TASK_GET).query(query)).await
	}
}
