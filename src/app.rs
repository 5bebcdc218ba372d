//! Application context: credentials, configuration, transport and token caches.

// self
use crate::{
	_prelude::*,
	api::{Calendar, Contact, Document, Message, UserGroup},
	auth::{AccessToken, AppCredentials, TokenKind},
	config::AppConfig,
	error::RemoteApiError,
	http::{ApiHttpClient, ResponseMetadata},
	obs::{self, CallKind, CallOutcome, CallSpan},
	request::{ApiRequest, Credential},
	token::{self, TokenProvider},
	transport::TransportErrorMapper,
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, transport::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// App specialized for the crate's default reqwest transport stack.
pub type ReqwestApp = App<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// One platform application and everything needed to call the platform on its behalf.
///
/// The app owns the HTTP client, the transport error mapper and one [`TokenProvider`] per
/// [`TokenKind`]. Clones share the transport and the token caches, so a single app can be
/// handed to many tasks while every task observes the same cached tokens.
pub struct App<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Base URL and token policy.
	pub config: AppConfig,
	/// App id + secret exchanged for access tokens.
	pub credentials: AppCredentials,
	tenant_token: Arc<TokenProvider>,
	app_token: Arc<TokenProvider>,
}
impl<C, M> App<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates an app that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		config: AppConfig,
		credentials: AppCredentials,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		let margin = config.safety_margin;

		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			config,
			credentials,
			tenant_token: Arc::new(TokenProvider::new(TokenKind::Tenant, margin)),
			app_token: Arc::new(TokenProvider::new(TokenKind::App, margin)),
		}
	}

	/// Token provider backing `kind`.
	pub fn token_provider(&self, kind: TokenKind) -> &TokenProvider {
		match kind {
			TokenKind::Tenant => &self.tenant_token,
			TokenKind::App => &self.app_token,
		}
	}

	/// Returns a usable access token of `kind`, calling the identity endpoint only when the
	/// cache holds nothing usable.
	pub async fn access_token(&self, kind: TokenKind) -> Result<AccessToken> {
		let token = self
			.token_provider(kind)
			.get_with(|| {
				token::exchange(
					self.http_client.as_ref(),
					self.transport_mapper.as_ref(),
					&self.config,
					&self.credentials,
					kind,
				)
			})
			.await?;

		Ok(token)
	}

	/// Returns a usable tenant access token.
	pub async fn tenant_access_token(&self) -> Result<AccessToken> {
		self.access_token(TokenKind::Tenant).await
	}

	/// Returns a usable app access token.
	pub async fn app_access_token(&self) -> Result<AccessToken> {
		self.access_token(TokenKind::App).await
	}

	/// Drops the cached token of `kind`; the next call refreshes it.
	pub fn invalidate(&self, kind: TokenKind) -> Option<AccessToken> {
		self.token_provider(kind).invalidate()
	}

	/// Dispatches `request` and returns the raw response body.
	///
	/// The request's [`Credential`] decides which bearer token is attached. Non-2xx answers
	/// become [`RemoteApiError::Status`] with the body preserved; 2xx bodies are returned
	/// untouched, including bodies that carry a non-zero application code.
	pub async fn call(&self, request: ApiRequest) -> Result<Vec<u8>> {
		let operation = request.operation;
		let span = CallSpan::new(CallKind::Api, operation);

		obs::record_call_outcome(CallKind::Api, operation, CallOutcome::Attempt);

		let result = span.instrument(self.dispatch(request)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(CallKind::Api, operation, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(CallKind::Api, operation, CallOutcome::Failure),
		}

		result
	}

	/// Message and image endpoints.
	pub fn message(&self) -> Message<'_, C, M> {
		Message::new(self)
	}

	/// Calendar endpoints.
	pub fn calendar(&self) -> Calendar<'_, C, M> {
		Calendar::new(self)
	}

	/// Contact directory endpoints.
	pub fn contact(&self) -> Contact<'_, C, M> {
		Contact::new(self)
	}

	/// User group and chat endpoints.
	pub fn user_group(&self) -> UserGroup<'_, C, M> {
		UserGroup::new(self)
	}

	/// Document endpoints (authorized with user access tokens).
	pub fn document(&self) -> Document<'_, C, M> {
		Document::new(self)
	}

	async fn dispatch(&self, request: ApiRequest) -> Result<Vec<u8>> {
		let operation = request.operation;
		let bearer = match &request.credential {
			Credential::Tenant => self.access_token(TokenKind::Tenant).await?.value,
			Credential::App => self.access_token(TokenKind::App).await?.value,
			Credential::User(token) => token.clone(),
		};
		let http_request = request.into_http(&self.config.base_url, bearer.expose())?;
		let response = self
			.http_client
			.execute(http_request)
			.await
			.map_err(|err| self.transport_mapper.map_transport_error(operation, err))?;
		let meta = ResponseMetadata::from_response(&response);

		if !meta.is_success() {
			return Err(RemoteApiError::Status {
				operation,
				status: meta.status,
				retry_after: meta.retry_after,
				body: response.into_body(),
			}
			.into());
		}

		Ok(response.into_body())
	}
}
#[cfg(feature = "reqwest")]
impl App<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates an app for the Feishu platform with the default reqwest transport.
	pub fn new(credentials: AppCredentials) -> Self {
		Self::with_config(AppConfig::default(), credentials)
	}

	/// Creates an app with a custom configuration and the default reqwest transport.
	pub fn with_config(config: AppConfig, credentials: AppCredentials) -> Self {
		Self::with_http_client(
			config,
			credentials,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> Clone for App<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			transport_mapper: self.transport_mapper.clone(),
			config: self.config.clone(),
			credentials: self.credentials.clone(),
			tenant_token: self.tenant_token.clone(),
			app_token: self.app_token.clone(),
		}
	}
}
impl<C, M> Debug for App<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("App")
			.field("config", &self.config)
			.field("credentials", &self.credentials)
			.finish()
	}
}
