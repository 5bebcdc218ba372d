//! Application configuration and its validating builder.

// std
use std::sync::LazyLock;
// self
use crate::_prelude::*;

/// Base URL of the Feishu (China) open platform.
pub const FEISHU_BASE_URL: &str = "https://open.feishu.cn";
/// Base URL of the Lark (international) open platform.
pub const LARK_BASE_URL: &str = "https://open.larksuite.com";

/// Default buffer subtracted from a token's literal expiry before it is considered unusable.
pub const DEFAULT_SAFETY_MARGIN: Duration = Duration::seconds(30);

static FEISHU_URL: LazyLock<Url> =
	LazyLock::new(|| Url::parse(FEISHU_BASE_URL).expect("Feishu base URL constant is valid."));
static LARK_URL: LazyLock<Url> =
	LazyLock::new(|| Url::parse(LARK_BASE_URL).expect("Lark base URL constant is valid."));

/// Errors raised while constructing or validating an [`AppConfig`].
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum AppConfigError {
	/// Base URL could not be parsed.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Raw URL that failed to parse.
		url: String,
	},
	/// Base URL must use HTTPS unless insecure transports are explicitly allowed.
	#[error("The base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// Base URL that failed validation.
		url: String,
	},
	/// Base URL cannot act as a hierarchical base (e.g. `mailto:`).
	#[error("The base URL cannot be used as a base: {url}.")]
	CannotBeABase {
		/// Base URL that failed validation.
		url: String,
	},
}

/// Immutable configuration consumed by [`App`](crate::app::App).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
	/// Platform root every endpoint path is resolved against.
	pub base_url: Url,
	/// Buffer subtracted from token expiry; tokens inside it are refreshed proactively.
	pub safety_margin: Duration,
}
impl AppConfig {
	/// Creates a builder seeded with the Feishu defaults.
	pub fn builder() -> AppConfigBuilder {
		AppConfigBuilder::default()
	}

	/// Configuration for the Feishu (China) platform.
	pub fn feishu() -> Self {
		Self::preset(&FEISHU_URL)
	}

	/// Configuration for the Lark (international) platform.
	pub fn lark() -> Self {
		Self::preset(&LARK_URL)
	}

	fn preset(base: &Url) -> Self {
		Self { base_url: base.clone(), safety_margin: DEFAULT_SAFETY_MARGIN }
	}
}
impl Default for AppConfig {
	fn default() -> Self {
		Self::feishu()
	}
}

/// Builder for [`AppConfig`] values.
#[derive(Debug)]
pub struct AppConfigBuilder {
	/// Raw base URL; parsed during [`build`](Self::build).
	pub base_url: String,
	/// Safety margin applied to cached tokens.
	pub safety_margin: Duration,
	/// Permits plain-HTTP base URLs (mock servers, local proxies).
	pub allow_insecure: bool,
}
impl AppConfigBuilder {
	/// Sets the platform base URL.
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = url.into();

		self
	}

	/// Overrides the safety margin (negative values clamp to zero).
	pub fn safety_margin(mut self, margin: Duration) -> Self {
		self.safety_margin = if margin.is_negative() { Duration::ZERO } else { margin };

		self
	}

	/// Allows or forbids plain-HTTP base URLs.
	pub fn allow_insecure(mut self, allow: bool) -> Self {
		self.allow_insecure = allow;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<AppConfig, AppConfigError> {
		let base_url = Url::parse(&self.base_url)
			.map_err(|_| AppConfigError::InvalidBaseUrl { url: self.base_url.clone() })?;

		if base_url.cannot_be_a_base() {
			return Err(AppConfigError::CannotBeABase { url: base_url.to_string() });
		}
		if base_url.scheme() != "https" && !(self.allow_insecure && base_url.scheme() == "http") {
			return Err(AppConfigError::InsecureBaseUrl { url: base_url.to_string() });
		}

		Ok(AppConfig { base_url, safety_margin: self.safety_margin })
	}
}
impl Default for AppConfigBuilder {
	fn default() -> Self {
		Self {
			base_url: FEISHU_BASE_URL.into(),
			safety_margin: DEFAULT_SAFETY_MARGIN,
			allow_insecure: false,
		}
	}
}
