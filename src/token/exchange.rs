//! Identity-endpoint exchange: credentials in, [`AccessToken`] out.

// crates.io
use oauth2::http::{
	Method, Request,
	header::{ACCEPT, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AppCredentials, Secret, TokenKind},
	config::AppConfig,
	error::{AuthError, ConfigError},
	http::{ApiHttpClient, HttpRequest, HttpResponse, ResponseMetadata},
	request::JSON_CONTENT_TYPE,
	transport::TransportErrorMapper,
};

type DecodeError = serde_path_to_error::Error<serde_json::Error>;

#[derive(Serialize)]
struct IdentityRequest<'a> {
	app_id: &'a str,
	app_secret: &'a str,
}

#[derive(Debug, Deserialize)]
struct IdentityResponse {
	#[serde(default)]
	code: i64,
	#[serde(default)]
	msg: String,
	#[serde(default)]
	tenant_access_token: Option<String>,
	#[serde(default)]
	app_access_token: Option<String>,
	#[serde(default, alias = "expires_in")]
	expire: Option<i64>,
}

/// Calls the identity endpoint for `kind` and converts the answer into an [`AccessToken`].
pub(crate) async fn exchange<C, M>(
	http_client: &C,
	mapper: &M,
	config: &AppConfig,
	credentials: &AppCredentials,
	kind: TokenKind,
) -> Result<AccessToken, AuthError>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let request = build_request(config, credentials, kind)
		.map_err(|err| AuthError::Exchange { source: Arc::new(err) })?;
	let response = http_client.execute(request).await.map_err(|err| AuthError::Exchange {
		source: Arc::new(mapper.map_transport_error(kind.operation(), err)),
	})?;

	parse_response(kind, &response, OffsetDateTime::now_utc())
}

fn build_request(
	config: &AppConfig,
	credentials: &AppCredentials,
	kind: TokenKind,
) -> Result<HttpRequest> {
	let path = kind.endpoint_path();
	let url = config
		.base_url
		.join(path)
		.map_err(|source| ConfigError::InvalidEndpoint { path: path.into(), source })?;
	let body = serde_json::to_vec(&IdentityRequest {
		app_id: &credentials.app_id,
		app_secret: credentials.app_secret.expose(),
	})
	.map_err(ConfigError::from)?;
	let request = Request::builder()
		.method(Method::POST)
		.uri(url.as_str())
		.header(CONTENT_TYPE, JSON_CONTENT_TYPE)
		.header(ACCEPT, "application/json")
		.body(body)
		.map_err(ConfigError::from)?;

	Ok(request)
}

fn parse_response(
	kind: TokenKind,
	response: &HttpResponse,
	issued_at: OffsetDateTime,
) -> Result<AccessToken, AuthError> {
	let meta = ResponseMetadata::from_response(response);
	let decoded = decode(response.body());

	if !meta.is_success() {
		// Error bodies usually still carry the platform code; prefer it over the bare status.
		return Err(match decoded {
			Ok(parsed) if parsed.code != 0 =>
				AuthError::Rejected { code: parsed.code, message: parsed.msg },
			_ => AuthError::Status { status: meta.status, retry_after: meta.retry_after },
		});
	}

	let parsed = decoded.map_err(|source| AuthError::MalformedResponse {
		source: Arc::new(source),
		status: meta.status,
	})?;

	if parsed.code != 0 {
		return Err(AuthError::Rejected { code: parsed.code, message: parsed.msg });
	}

	let (value, field) = match kind {
		TokenKind::Tenant => (parsed.tenant_access_token, "tenant_access_token"),
		TokenKind::App => (parsed.app_access_token, "app_access_token"),
	};
	let value = value.filter(|value| !value.is_empty()).ok_or(AuthError::MissingToken { field })?;
	let expire = parsed.expire;
	let expires_at = expire
		.filter(|secs| *secs > 0)
		.and_then(|secs| issued_at.checked_add(Duration::seconds(secs)))
		.ok_or(AuthError::InvalidExpiry { expire })?;

	Ok(AccessToken { kind, value: Secret::new(value), issued_at, expires_at })
}

fn decode(body: &[u8]) -> Result<IdentityResponse, DecodeError> {
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::StatusCode;
	use time::macros;
	// self
	use super::*;

	fn response(status: StatusCode, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() = status;

		response
	}

	fn issued() -> OffsetDateTime {
		macros::datetime!(2025-06-01 08:00 UTC)
	}

	#[test]
	fn request_posts_credentials_as_json() {
		let credentials =
			AppCredentials::new("a", "b").expect("Credential fixture should be valid.");
		let request = build_request(&AppConfig::feishu(), &credentials, TokenKind::Tenant)
			.expect("Identity request should build.");
		let body: serde_json::Value =
			serde_json::from_slice(request.body()).expect("Identity body should be JSON.");

		assert_eq!(request.method(), Method::POST);
		assert_eq!(
			request.uri().to_string(),
			"https://open.feishu.cn/open-apis/auth/v3/tenant_access_token/internal/"
		);
		assert_eq!(request.headers()[CONTENT_TYPE], JSON_CONTENT_TYPE);
		assert_eq!(body, serde_json::json!({ "app_id": "a", "app_secret": "b" }));
	}

	#[test]
	fn tenant_response_yields_token_with_expiry() {
		let token = parse_response(
			TokenKind::Tenant,
			&response(
				StatusCode::OK,
				r#"{"code":0,"msg":"ok","tenant_access_token":"T1","expire":7200}"#,
			),
			issued(),
		)
		.expect("Well-formed tenant response should parse.");

		assert_eq!(token.secret(), "T1");
		assert_eq!(token.kind, TokenKind::Tenant);
		assert_eq!(token.expires_at, macros::datetime!(2025-06-01 10:00 UTC));
	}

	#[test]
	fn app_response_accepts_expires_in_alias() {
		let token = parse_response(
			TokenKind::App,
			&response(StatusCode::OK, r#"{"code":0,"app_access_token":"A1","expires_in":60}"#),
			issued(),
		)
		.expect("App response using expires_in should parse.");

		assert_eq!(token.secret(), "A1");
		assert_eq!(token.expires_at, macros::datetime!(2025-06-01 08:01 UTC));
	}

	#[test]
	fn application_codes_become_rejections() {
		for status in [StatusCode::OK, StatusCode::BAD_REQUEST] {
			let err = parse_response(
				TokenKind::Tenant,
				&response(status, r#"{"code":10014,"msg":"app secret invalid"}"#),
				issued(),
			)
			.expect_err("Non-zero codes must be rejected.");

			match err {
				AuthError::Rejected { code, message } => {
					assert_eq!(code, 10014);
					assert_eq!(message, "app secret invalid");
				},
				other => panic!("Unexpected error variant: {other:?}."),
			}
		}
	}

	#[test]
	fn non_success_status_without_code_reports_status() {
		let err = parse_response(
			TokenKind::Tenant,
			&response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
			issued(),
		)
		.expect_err("Gateway failures must surface as auth errors.");

		assert!(matches!(err, AuthError::Status { status: 502, retry_after: None }));
	}

	#[test]
	fn malformed_json_reports_the_failing_path() {
		let err = parse_response(
			TokenKind::Tenant,
			&response(StatusCode::OK, r#"{"code":0,"tenant_access_token":"T1","expire":"soon"}"#),
			issued(),
		)
		.expect_err("Non-numeric expiry must fail to decode.");

		match err {
			AuthError::MalformedResponse { source, status } => {
				assert_eq!(status, 200);
				assert_eq!(source.path().to_string(), "expire");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn missing_token_and_bad_expiry_are_rejected() {
		let missing = parse_response(
			TokenKind::App,
			&response(StatusCode::OK, r#"{"code":0,"tenant_access_token":"T1","expire":7200}"#),
			issued(),
		)
		.expect_err("App exchange must require app_access_token.");
		let zero = parse_response(
			TokenKind::Tenant,
			&response(StatusCode::OK, r#"{"code":0,"tenant_access_token":"T1","expire":0}"#),
			issued(),
		)
		.expect_err("Zero expiry must be rejected.");
		let absent = parse_response(
			TokenKind::Tenant,
			&response(StatusCode::OK, r#"{"code":0,"tenant_access_token":"T1"}"#),
			issued(),
		)
		.expect_err("Missing expiry must be rejected.");

		assert!(matches!(missing, AuthError::MissingToken { field: "app_access_token" }));
		assert!(matches!(zero, AuthError::InvalidExpiry { expire: Some(0) }));
		assert!(matches!(absent, AuthError::InvalidExpiry { expire: None }));
	}
}
