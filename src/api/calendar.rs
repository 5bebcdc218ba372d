//! Calendars, events, attendees, access control and free/busy queries.

// self
use crate::{
	_prelude::*,
	api::def_api,
	http::ApiHttpClient,
	request::{ApiRequest, Query},
	transport::TransportErrorMapper,
};

const CALENDAR_LIST: &str = "/open-apis/calendar/v3/calendar_list";
const CALENDARS: &str = "/open-apis/calendar/v3/calendars";
const FREE_BUSY_QUERY: &str = "/open-apis/calendar/v3/freebusy/query";
const SHARED_CALENDAR_QUERY: &str = "/open-apis/calendar/v3/shared_calendars/query";
const SHARED_CALENDARS: &str = "/open-apis/calendar/v3/shared/calendars";

def_api! {
	/// Calendar endpoints, authorized with the tenant access token.
	Calendar
}
impl<C, M> Calendar<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches one calendar.
	pub async fn get_calendar(&self, calendar_id: &str) -> Result<Vec<u8>> {
		self.app
			.call(ApiRequest::get("calendar.get_calendar", CALENDAR_LIST).segment(calendar_id))
			.await
	}

	/// Lists the calendars visible to the app.
	pub async fn calendar_list(&self, query: &Query) -> Result<Vec<u8>> {
		self.app.call(ApiRequest::get("calendar.calendar_list", CALENDAR_LIST).query(query)).await
	}

	/// Creates a calendar.
	pub async fn create_calendar<T>(&self, payload: &T) -> Result<Vec<u8>>
	where
		T: ?Sized + Serialize,
	{
		self.app.call(ApiRequest::post("calendar.create_calendar", CALENDARS).json(payload)?).await
	}

	/// Deletes a calendar.
	pub async fn delete_calendar(&self, calendar_id: &str) -> Result<Vec<u8>> {
		self.app
			.call(ApiRequest::delete("calendar.delete_calendar", CALENDARS).segment(calendar_id))
			.await
	}

	/// Updates a calendar.
	pub async fn update_calendar<T>(&self, calendar_id: &str, payload: &T) -> Result<Vec<u8>>
	where
		T: ?Sized + Serialize,
	{
		let request = ApiRequest::patch("calendar.update_calendar", CALENDARS)
			.segment(calendar_id)
			.json(payload)?;

		self.app.call(request).await
	}

	/// Fetches one event.
	pub async fn get_event(&self, calendar_id: &str, event_id: &str) -> Result<Vec<u8>> {
		let request =
			event(ApiRequest::get("calendar.get_event", CALENDARS), calendar_id, event_id);

		self.app.call(request).await
	}

	/// Creates an event.
	pub async fn create_event<T>(&self, calendar_id: &str, payload: &T) -> Result<Vec<u8>>
	where
		T: ?Sized + Serialize,
	{
		let request = ApiRequest::post("calendar.create_event", CALENDARS)
			.segment(calendar_id)
			.segment("events")
			.json(payload)?;

		self.app.call(request).await
	}

	/// Lists the events of a calendar.
	pub async fn get_events(&self, calendar_id: &str, query: &Query) -> Result<Vec<u8>> {
		let request = ApiRequest::get("calendar.get_events", CALENDARS)
			.segment(calendar_id)
			.segment("events")
			.query(query);

		self.app.call(request).await
	}

	/// Deletes an event.
	pub async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<Vec<u8>> {
		let request =
			event(ApiRequest::delete("calendar.delete_event", CALENDARS), calendar_id, event_id);

		self.app.call(request).await
	}

	/// Updates an event.
	pub async fn update_event<T>(
		&self,
		calendar_id: &str,
		event_id: &str,
		payload: &T,
	) -> Result<Vec<u8>>
	where
		T: ?Sized + Serialize,
	{
		let request =
			event(ApiRequest::patch("calendar.update_event", CALENDARS), calendar_id, event_id)
				.json(payload)?;

		self.app.call(request).await
	}

	/// Invites attendees to an event.
	pub async fn attendees<T>(
		&self,
		calendar_id: &str,
		event_id: &str,
		payload: &T,
	) -> Result<Vec<u8>>
	where
		T: ?Sized + Serialize,
	{
		let request =
			event(ApiRequest::post("calendar.attendees", CALENDARS), calendar_id, event_id)
				.segment("attendees")
				.json(payload)?;

		self.app.call(request).await
	}

	/// Lists the access-control rules of a calendar.
	pub async fn get_acl(&self, calendar_id: &str) -> Result<Vec<u8>> {
		let request =
			ApiRequest::get("calendar.get_acl", CALENDARS).segment(calendar_id).segment("acl");

		self.app.call(request).await
	}

	/// Adds an access-control rule.
	pub async fn create_acl<T>(&self, calendar_id: &str, payload: &T) -> Result<Vec<u8>>
	where
		T: ?Sized + Serialize,
	{
		let request = ApiRequest::post("calendar.create_acl", CALENDARS)
			.segment(calendar_id)
			.segment("acl")
			.json(payload)?;

		self.app.call(request).await
	}

	/// Removes an access-control rule.
	pub async fn delete_acl(&self, calendar_id: &str, rule_id: &str) -> Result<Vec<u8>> {
		let request = ApiRequest::delete("calendar.delete_acl", CALENDARS)
			.segment(calendar_id)
			.segment("acl")
			.segment(rule_id);

		self.app.call(request).await
	}

	/// Queries free/busy information for users or rooms.
	pub async fn free_busy_query<T>(&self, payload: &T) -> Result<Vec<u8>>
	where
		T: ?Sized + Serialize,
	{
		let request = ApiRequest::post("calendar.free_busy_query", FREE_BUSY_QUERY).json(payload)?;

		self.app.call(request).await
	}

	/// Searches shared calendars.
	pub async fn shared_calendar_query(&self, query: &Query) -> Result<Vec<u8>> {
		let request =
			ApiRequest::get("calendar.shared_calendar_query", SHARED_CALENDAR_QUERY).query(query);

		self.app.call(request).await
	}

	/// Lists the events of a shared calendar.
	pub async fn shared_calendar_events(
		&self,
		calendar_id: &str,
		query: &Query,
	) -> Result<Vec<u8>> {
		let request = ApiRequest::get("calendar.shared_calendar_events", SHARED_CALENDARS)
			.segment(calendar_id)
			.segment("events")
			.query(query);

		self.app.call(request).await
	}
}

fn event(request: ApiRequest, calendar_id: &str, event_id: &str) -> ApiRequest {
	request.segment(calendar_id).segment("events").segment(event_id)
}
