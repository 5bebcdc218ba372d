//! Application credentials exchanged for access tokens.

// self
use crate::{
	_prelude::*,
	auth::{AppId, IdentifierError, Secret},
};

/// App id + app secret pair issued by the developer console.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppCredentials {
	/// Application identifier.
	pub app_id: AppId,
	/// Application secret; never printed.
	pub app_secret: Secret,
}
impl AppCredentials {
	/// Validates and wraps a credential pair.
	pub fn new(
		app_id: impl AsRef<str>,
		app_secret: impl Into<String>,
	) -> Result<Self, IdentifierError> {
		Ok(Self { app_id: AppId::new(app_id)?, app_secret: Secret::new(app_secret) })
	}
}
impl Debug for AppCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppCredentials")
			.field("app_id", &self.app_id)
			.field("app_secret", &"<redacted>")
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn debug_hides_the_secret() {
		let credentials = AppCredentials::new("cli_a", "very-secret")
			.expect("Credential fixture should be valid.");
		let rendered = format!("{credentials:?}");

		assert!(rendered.contains("cli_a"));
		assert!(!rendered.contains("very-secret"));
	}

	#[test]
	fn invalid_app_id_is_rejected() {
		assert!(AppCredentials::new("", "secret").is_err());
	}
}
