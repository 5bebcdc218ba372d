//! Sends a bot message through the message endpoints and inspects the response envelope.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use feishu_openapi::{AppConfig, AppCredentials, ReqwestApp, api::ApiEnvelope};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/open-apis/auth/v3/tenant_access_token/internal/");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"code\":0,\"tenant_access_token\":\"t-demo\",\"expire\":7200}");
		})
		.await;

	let send_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/open-apis/message/v4/send/")
				.header("authorization", "Bearer t-demo");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"code\":0,\"msg\":\"ok\",\"data\":{\"message_id\":\"om_demo\"}}");
		})
		.await;
	let config = AppConfig::builder().base_url(server.base_url()).allow_insecure(true).build()?;
	let app = ReqwestApp::with_config(config, AppCredentials::new("cli_demo", "demo-secret")?);
	let body = app
		.message()
		.send(&json!({
			"chat_id": "oc_demo",
			"msg_type": "text",
			"content": { "text": "hello from feishu-openapi" }
		}))
		.await?;
	let envelope = ApiEnvelope::check(&body)?;

	println!("envelope: {envelope:?}");
	println!("raw body: {}", String::from_utf8_lossy(&body));

	send_mock.assert_async().await;

	Ok(())
}
