//! Contact directory: tenant attributes, visibility scope, departments and users.

pub mod async_batch;

// self
use crate::{
	_prelude::*,
	api::def_api,
	http::ApiHttpClient,
	request::{ApiRequest, Query},
	transport::TransportErrorMapper,
};

const TENANT_CUSTOM_ATTR_GET: &str = "/open-apis/contact/v2/tenant/custom_attr/get";
const SCOPE_GET: &str = "/open-apis/contact/v1/scope/get";
const DEPARTMENT_INFO_GET: &str = "/open-apis/contact/v1/department/info/get";
const DEPARTMENT_SIMPLE_LIST: &str = "/open-apis/contact/v1/department/simple/list";
const USER_BATCH_GET: &str = "/open-apis/contact/v1/user/batch_get";

def_api! {
	/// Contact endpoints, authorized with the tenant access token.
	Contact
}
impl<C, M> Contact<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the tenant's custom user attribute definitions.
	pub async fn tenant_custom_attr_get(&self) -> Result<Vec<u8>> {
		self.app
			.call(ApiRequest::get("contact.tenant_custom_attr_get", TENANT_CUSTOM_ATTR_GET))
			.await
	}

	/// Fetches the app's contact visibility scope.
	pub async fn scope_get(&self) -> Result<Vec<u8>> {
		self.app.call(ApiRequest::get("contact.scope_get", SCOPE_GET)).await
	}

	/// Fetches one department.
	pub async fn department_info_get(&self, query: &Query) -> Result<Vec<u8>> {
		let request =
			ApiRequest::get("contact.department_info_get", DEPARTMENT_INFO_GET).query(query);

		self.app.call(request).await
	}

	/// Lists child departments.
	pub async fn department_simple_list(&self, query: &Query) -> Result<Vec<u8>> {
		let request =
			ApiRequest::get("contact.department_simple_list", DEPARTMENT_SIMPLE_LIST).query(query);

		self.app.call(request).await
	}

	/// Fetches users in bulk by id.
	pub async fn user_batch_get(&self, query: &Query) -> Result<Vec<u8>> {
		self.app.call(ApiRequest::get("contact.user_batch_get", USER_BATCH_GET).query(query)).await
	}
}
