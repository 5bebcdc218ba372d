//! Request assembly shared by every endpoint function.
//!
//! An [`ApiRequest`] is a transport-neutral description of one platform call. The
//! [`App`](crate::app::App) resolves its [`Credential`] into a bearer token and turns it into an
//! [`HttpRequest`] via [`ApiRequest::into_http`].

// crates.io
use oauth2::http::{
	HeaderValue, Method, Request,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::{Secret, TokenKind},
	error::ConfigError,
	http::HttpRequest,
	multipart::MultipartForm,
};

/// Content type attached to JSON payloads.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Ordered query pairs; repeated keys are kept as separate pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);
impl Query {
	/// Creates an empty query.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a pair and returns the query for chaining.
	pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
		self.push(key, value);

		self
	}

	/// Appends a pair.
	pub fn push(&mut self, key: impl Into<String>, value: impl Display) {
		self.0.push((key.into(), value.to_string()));
	}

	/// Returns `true` when no pairs were added.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over the pairs in insertion order.
	pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
	}
}
impl<K, V> FromIterator<(K, V)> for Query
where
	K: Into<String>,
	V: Display,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		let mut query = Self::new();

		for (key, value) in iter {
			query.push(key, value);
		}

		query
	}
}

/// Request body variants.
#[derive(Clone, Debug, Default)]
pub enum Body {
	/// No body; no `Content-Type` header is sent.
	#[default]
	Empty,
	/// Serialized JSON document.
	Json(Vec<u8>),
	/// `multipart/form-data` form.
	Multipart(MultipartForm),
}
impl Body {
	/// Serializes `payload` as JSON.
	pub fn json<T>(payload: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		Ok(Self::Json(serde_json::to_vec(payload).map_err(ConfigError::from)?))
	}
}

/// Access token used to authorize a request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Credential {
	/// Cached tenant access token.
	#[default]
	Tenant,
	/// Cached app access token.
	App,
	/// Caller-supplied user access token; never cached by the client.
	User(Secret),
}
impl Credential {
	/// Wraps a user access token.
	pub fn user(token: impl Into<String>) -> Self {
		Self::User(Secret::new(token))
	}

	/// Token kind served from the cache, or `None` for user tokens.
	pub fn token_kind(&self) -> Option<TokenKind> {
		match self {
			Self::Tenant => Some(TokenKind::Tenant),
			Self::App => Some(TokenKind::App),
			Self::User(_) => None,
		}
	}
}

/// Transport-neutral description of one platform call.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// Stable operation label used for spans, metrics and error context.
	pub operation: &'static str,
	/// HTTP method.
	pub method: Method,
	/// Absolute endpoint path, resolved against the configured base URL.
	pub path: &'static str,
	/// Path segments appended after `path`; each one is percent-encoded.
	pub segments: Vec<String>,
	/// Query pairs.
	pub query: Query,
	/// Request body.
	pub body: Body,
	/// Credential that authorizes the call.
	pub credential: Credential,
}
impl ApiRequest {
	/// Starts a request with an explicit method.
	pub fn new(method: Method, operation: &'static str, path: &'static str) -> Self {
		Self {
			operation,
			method,
			path,
			segments: Vec::new(),
			query: Query::default(),
			body: Body::Empty,
			credential: Credential::Tenant,
		}
	}

	/// Starts a `GET` request.
	pub fn get(operation: &'static str, path: &'static str) -> Self {
		Self::new(Method::GET, operation, path)
	}

	/// Starts a `POST` request.
	pub fn post(operation: &'static str, path: &'static str) -> Self {
		Self::new(Method::POST, operation, path)
	}

	/// Starts a `PATCH` request.
	pub fn patch(operation: &'static str, path: &'static str) -> Self {
		Self::new(Method::PATCH, operation, path)
	}

	/// Starts a `DELETE` request.
	pub fn delete(operation: &'static str, path: &'static str) -> Self {
		Self::new(Method::DELETE, operation, path)
	}

	/// Appends a path segment (identifiers are escaped, never interpreted).
	pub fn segment(mut self, segment: impl Into<String>) -> Self {
		self.segments.push(segment.into());

		self
	}

	/// Replaces the query pairs.
	pub fn query(mut self, query: &Query) -> Self {
		self.query = query.clone();

		self
	}

	/// Attaches a JSON body.
	pub fn json<T>(mut self, payload: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		self.body = Body::json(payload)?;

		Ok(self)
	}

	/// Attaches a multipart body.
	pub fn multipart(mut self, form: MultipartForm) -> Self {
		self.body = Body::Multipart(form);

		self
	}

	/// Selects the credential that authorizes the call.
	pub fn credential(mut self, credential: Credential) -> Self {
		self.credential = credential;

		self
	}

	/// Builds the HTTP request against `base` with `bearer` as the access token.
	pub fn into_http(self, base: &Url, bearer: &str) -> Result<HttpRequest> {
		let mut url = base
			.join(self.path)
			.map_err(|source| ConfigError::InvalidEndpoint { path: self.path.into(), source })?;

		if !self.segments.is_empty() {
			let opaque = || ConfigError::OpaqueBaseUrl { url: base.to_string() };
			let mut segments = url.path_segments_mut().map_err(|_| opaque())?;

			segments.pop_if_empty().extend(&self.segments);
		}
		if !self.query.is_empty() {
			url.query_pairs_mut().extend_pairs(self.query.pairs());
		}

		let mut authorization =
			HeaderValue::try_from(format!("Bearer {bearer}")).map_err(ConfigError::from)?;

		authorization.set_sensitive(true);

		let builder = Request::builder()
			.method(self.method)
			.uri(url.as_str())
			.header(AUTHORIZATION, authorization);
		let (builder, body) = match self.body {
			Body::Empty => (builder, Vec::new()),
			Body::Json(bytes) => (builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE), bytes),
			Body::Multipart(form) =>
				(builder.header(CONTENT_TYPE, form.content_type()), form.encode()),
		};

		Ok(builder.body(body).map_err(ConfigError::from)?)
	}
}
