// crates.io
use oauth2::http::{StatusCode, header::AUTHORIZATION};
// self
use feishu_openapi::{
	_preludet::*,
	app::App,
	auth::{AppCredentials, TokenKind},
	config::AppConfig,
	error::{AuthError, TransportError},
	http::{ApiHttpClient, HttpClientError, HttpFuture, HttpRequest, HttpResponse},
	transport::TransportErrorMapper,
};

type FakeApp = App<ScriptedHttpClient, RecordingTransportErrorMapper>;

#[derive(Debug)]
enum FakeTransportError {
	Unreachable,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Unreachable => write!(f, "Platform unreachable."),
		}
	}
}
impl StdError for FakeTransportError {}

/// Answers every request from a canned script and records what was sent.
#[derive(Default)]
struct ScriptedHttpClient {
	offline: bool,
	requests: Mutex<Vec<(String, Option<String>)>>,
}
impl ScriptedHttpClient {
	fn offline() -> Self {
		Self { offline: true, ..Default::default() }
	}

	fn recorded(&self) -> Vec<(String, Option<String>)> {
		self.requests.lock().clone()
	}
}
impl ApiHttpClient for ScriptedHttpClient {
	type TransportError = FakeTransportError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		Box::pin(async move {
			let path = request.uri().path().to_owned();
			let bearer = request
				.headers()
				.get(AUTHORIZATION)
				.and_then(|value| value.to_str().ok())
				.map(str::to_owned);

			self.requests.lock().push((path.clone(), bearer));

			if self.offline {
				return Err(HttpClientError::Reqwest(Box::new(FakeTransportError::Unreachable)));
			}

			let body = if path.ends_with("/tenant_access_token/internal/") {
				"{\"code\":0,\"tenant_access_token\":\"t-fake\",\"expire\":3600}"
			} else {
				"{\"code\":0,\"msg\":\"ok\"}"
			};
			let mut response = HttpResponse::new(body.as_bytes().to_vec());

			*response.status_mut() = StatusCode::OK;

			Ok(response)
		})
	}
}

#[derive(Clone, Default)]
struct RecordingTransportErrorMapper {
	operations: Arc<Mutex<Vec<&'static str>>>,
}
impl TransportErrorMapper<FakeTransportError> for RecordingTransportErrorMapper {
	fn map_transport_error(
		&self,
		operation: &'static str,
		err: HttpClientError<FakeTransportError>,
	) -> Error {
		self.operations.lock().push(operation);

		match err {
			HttpClientError::Reqwest(inner) => TransportError::network(operation, *inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			other => TransportError::Other { operation, message: other.to_string() }.into(),
		}
	}
}

fn credentials() -> AppCredentials {
	AppCredentials::new("cli_fake", "fake-secret").expect("Fake credentials should be valid.")
}

#[tokio::test]
async fn custom_transport_drives_token_and_endpoint_calls() {
	let http_client = Arc::new(ScriptedHttpClient::default());
	let mapper = Arc::new(RecordingTransportErrorMapper::default());
	let app =
		FakeApp::with_http_client(AppConfig::lark(), credentials(), http_client.clone(), mapper);

	app.contact().scope_get().await.expect("Scope lookup should succeed.");
	app.contact().tenant_custom_attr_get().await.expect("Attribute lookup should succeed.");

	assert_eq!(
		http_client.recorded(),
		vec![
			("/open-apis/auth/v3/tenant_access_token/internal/".to_owned(), None),
			("/open-apis/contact/v1/scope/get".to_owned(), Some("Bearer t-fake".to_owned())),
			(
				"/open-apis/contact/v2/tenant/custom_attr/get".to_owned(),
				Some("Bearer t-fake".to_owned())
			),
		]
	);
}

#[tokio::test]
async fn transport_failures_reach_the_mapper_with_the_operation_label() {
	let http_client = Arc::new(ScriptedHttpClient::offline());
	let mapper = Arc::new(RecordingTransportErrorMapper::default());
	let app = FakeApp::with_http_client(
		AppConfig::default(),
		credentials(),
		http_client.clone(),
		mapper.clone(),
	);
	let token_err = app.tenant_access_token().await.expect_err("Offline transport must fail.");

	match &token_err {
		Error::Auth(AuthError::Exchange { source }) => {
			assert!(matches!(
				source.as_ref(),
				Error::Transport(TransportError::Network {
					operation: "auth.tenant_access_token",
					..
				})
			));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	let doc_err = app
		.document()
		.doc_meta("doccn1", "u-user")
		.await
		.expect_err("Offline transport must fail for user-token calls too.");

	assert!(matches!(
		doc_err,
		Error::Transport(TransportError::Network { operation: "document.doc_meta", .. })
	));
	assert_eq!(*mapper.operations.lock(), vec!["auth.tenant_access_token", "document.doc_meta"]);
	assert!(app.token_provider(TokenKind::Tenant).cached().is_none());
	assert_eq!(http_client.recorded().len(), 2);
}
