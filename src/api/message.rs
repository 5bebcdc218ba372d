//! Bot messages, images, files and app notifications.

// std
use std::path::Path;
// self
use crate::{
	_prelude::*,
	api::def_api,
	error::ConfigError,
	http::ApiHttpClient,
	multipart::MultipartForm,
	request::{ApiRequest, Query},
	transport::TransportErrorMapper,
};

const BATCH_SEND: &str = "/open-apis/message/v4/batch_send/";
const SEND: &str = "/open-apis/message/v4/send/";
const READ_INFO: &str = "/open-apis/message/v4/read_info/";
const IMAGE_PUT: &str = "/open-apis/image/v4/put/";
const IMAGE_GET: &str = "/open-apis/image/v4/get";
const FILE_GET: &str = "/open-apis/open-file/v1/get";
const APP_NOTIFY: &str = "/open-apis/notify/v4/appnotify";

/// Image uploaded through [`Message::image_put`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUpload {
	/// File name reported in the multipart part.
	pub file_name: String,
	/// Raw image bytes.
	pub data: Vec<u8>,
	/// Value of the `image_type` form field (`message` or `avatar`).
	pub image_type: String,
}
impl ImageUpload {
	/// Wraps in-memory image bytes.
	pub fn new(
		file_name: impl Into<String>,
		data: impl Into<Vec<u8>>,
		image_type: impl Into<String>,
	) -> Self {
		Self { file_name: file_name.into(), data: data.into(), image_type: image_type.into() }
	}

	/// Reads the image at `path`; the file name is the path's last component.
	pub fn from_path(path: impl AsRef<Path>, image_type: impl Into<String>) -> Result<Self> {
		let path = path.as_ref();
		let data = std::fs::read(path).map_err(|source| ConfigError::Attachment {
			path: path.display().to_string(),
			source,
		})?;
		let file_name =
			path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();

		Ok(Self::new(file_name, data, image_type))
	}

	fn into_form(self) -> MultipartForm {
		MultipartForm::new()
			.file("image", self.file_name, self.data)
			.text("image_type", self.image_type)
	}
}

def_api! {
	/// Message endpoints, authorized with the tenant access token.
	Message
}
impl<C, M> Message<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Sends one message to many users or departments.
	pub async fn batch_send<T>(&self, payload: &T) -> Result<Vec<u8>>
	where
		T: ?Sized + Serialize,
	{
		self.app.call(ApiRequest::post("message.batch_send", BATCH_SEND).json(payload)?).await
	}

	/// Sends a message to a user or chat.
	pub async fn send<T>(&self, payload: &T) -> Result<Vec<u8>>
	where
		T: ?Sized + Serialize,
	{
		self.app.call(ApiRequest::post("message.send", SEND).json(payload)?).await
	}

	/// Queries the read status of a message sent by the bot.
	pub async fn read_info<T>(&self, payload: &T) -> Result<Vec<u8>>
	where
		T: ?Sized + Serialize,
	{
		self.app.call(ApiRequest::post("message.read_info", READ_INFO).json(payload)?).await
	}

	/// Uploads an image as `multipart/form-data` and returns the body carrying its `image_key`.
	pub async fn image_put(&self, image: ImageUpload) -> Result<Vec<u8>> {
		let request = ApiRequest::post("message.image_put", IMAGE_PUT).multipart(image.into_form());

		self.app.call(request).await
	}

	/// Downloads an image by `image_key`.
	pub async fn image_get(&self, query: &Query) -> Result<Vec<u8>> {
		self.app.call(ApiRequest::get("message.image_get", IMAGE_GET).query(query)).await
	}

	/// Downloads a file by `file_key`.
	pub async fn file_get(&self, query: &Query) -> Result<Vec<u8>> {
		self.app.call(ApiRequest::get("message.file_get", FILE_GET).query(query)).await
	}

	/// Sends an app notification to users.
	pub async fn app_notify<T>(&self, payload: &T) -> Result<Vec<u8>>
	where
		T: ?Sized + Serialize,
	{
		self.app.call(ApiRequest::post("message.app_notify", APP_NOTIFY).json(payload)?).await
	}
}
