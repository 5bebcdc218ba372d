//! Demonstrates tenant-token caching against a mock platform: the first request exchanges the
//! app credentials, later requests reuse the cached token until it enters the safety margin.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use feishu_openapi::{AppConfig, AppCredentials, ReqwestApp, auth::TokenKind};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/open-apis/auth/v3/tenant_access_token/internal/");
			then.status(200).header("content-type", "application/json").body(
				"{\"code\":0,\"msg\":\"ok\",\"tenant_access_token\":\"t-demo\",\"expire\":7200}",
			);
		})
		.await;
	let config = AppConfig::builder().base_url(server.base_url()).allow_insecure(true).build()?;
	let credentials = AppCredentials::new("cli_demo", "demo-secret")?;
	let app = ReqwestApp::with_config(config, credentials);
	let first = app.tenant_access_token().await?;
	let second = app.tenant_access_token().await?;
	let metrics = app.token_provider(TokenKind::Tenant).metrics();

	println!("first token: {first:?}");
	println!("same token reused: {}", first.secret() == second.secret());
	println!("identity calls: {}, cache hits: {}", metrics.attempts(), metrics.cache_hits());

	token_mock.assert_calls_async(1).await;

	Ok(())
}
