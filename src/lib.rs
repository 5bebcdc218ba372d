//! Async Rust client for the Feishu/Lark open platform: cached tenant and app access tokens with
//! single-flight refresh, plus one typed method per REST endpoint returning raw response bytes.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod multipart;
pub mod obs;
pub mod request;
pub mod token;
pub mod transport;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		app::ReqwestApp,
		auth::AppCredentials,
		config::AppConfig,
		http::ReqwestHttpClient,
		transport::ReqwestTransportErrorMapper,
	};

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Builds a configuration pointing at a mock server, allowing plain HTTP.
	pub fn test_config(base_url: &str) -> AppConfig {
		AppConfig::builder()
			.base_url(base_url)
			.allow_insecure(true)
			.build()
			.expect("Mock server URL should be a valid base URL.")
	}

	/// Constructs a [`ReqwestApp`] against `base_url` with the reqwest transport used across
	/// integration tests.
	pub fn build_reqwest_test_app(base_url: &str, app_id: &str, app_secret: &str) -> ReqwestApp {
		let credentials =
			AppCredentials::new(app_id, app_secret).expect("Test credentials should be valid.");

		ReqwestApp::with_http_client(
			test_config(base_url),
			credentials,
			test_reqwest_http_client(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use app::App;
#[cfg(feature = "reqwest")] pub use app::ReqwestApp;
pub use auth::AppCredentials;
pub use config::AppConfig;
pub use error::{Error, Result};
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
