//! Groups the bot belongs to and their members.

// self
use crate::{
	_prelude::*,
	api::def_api,
	http::ApiHttpClient,
	request::{ApiRequest, Query},
	transport::TransportErrorMapper,
};

const GROUP_LIST: &str = "/open-apis/user/v4/group_list";
const MEMBERS: &str = "/open-apis/chat/v4/members";
const SEARCH: &str = "/open-apis/chat/v4/search";

def_api! {
	/// User group endpoints, authorized with the tenant access token.
	UserGroup
}
impl<C, M> UserGroup<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists the groups shared by the bot and a user.
	pub async fn group_list(&self, query: &Query) -> Result<Vec<u8>> {
		self.app.call(ApiRequest::get("user_group.group_list", GROUP_LIST).query(query)).await
	}

	/// Lists the members of a group.
	pub async fn members(&self, query: &Query) -> Result<Vec<u8>> {
		self.app.call(ApiRequest::get("user_group.members", MEMBERS).query(query)).await
	}

	/// Searches the groups visible to a user.
	pub async fn search(&self, query: &Query) -> Result<Vec<u8>> {
		self.app.call(ApiRequest::get("user_group.search", SEARCH).query(query)).await
	}
}
