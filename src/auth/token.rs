//! Immutable access-token values and their freshness rules.

// self
use crate::{_prelude::*, auth::Secret};

/// Kind of platform access token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
	/// `tenant_access_token`: acts on behalf of the tenant that installed the app.
	Tenant,
	/// `app_access_token`: acts as the application itself.
	App,
}
impl TokenKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenKind::Tenant => "tenant_access_token",
			TokenKind::App => "app_access_token",
		}
	}

	/// Identity endpoint path issuing this kind of token for self-built apps.
	pub const fn endpoint_path(self) -> &'static str {
		match self {
			TokenKind::Tenant => "/open-apis/auth/v3/tenant_access_token/internal/",
			TokenKind::App => "/open-apis/auth/v3/app_access_token/internal/",
		}
	}

	/// Operation label used when the identity endpoint is called.
	pub const fn operation(self) -> &'static str {
		match self {
			TokenKind::Tenant => "auth.tenant_access_token",
			TokenKind::App => "auth.app_access_token",
		}
	}
}
impl Display for TokenKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Freshness of a cached token at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenStatus {
	/// Usable: the instant is before `expires_at - margin`.
	Fresh,
	/// Not yet expired but inside the safety margin; must be refreshed before use.
	Stale,
	/// Past the literal expiry.
	Expired,
}

/// Access token issued by the identity endpoint.
///
/// Values are never mutated; a refresh produces a new token that replaces the cached one.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
	/// Which kind of token this is.
	pub kind: TokenKind,
	/// Bearer value; callers must avoid logging it.
	pub value: Secret,
	/// Instant the token was received.
	pub issued_at: OffsetDateTime,
	/// Literal expiry derived from `issued_at + expire`.
	pub expires_at: OffsetDateTime,
}
impl AccessToken {
	/// Creates a token that expires `expires_in` after `issued_at`, saturating at the
	/// representable date range.
	pub fn new(
		kind: TokenKind,
		value: impl Into<String>,
		issued_at: OffsetDateTime,
		expires_in: Duration,
	) -> Self {
		Self {
			kind,
			value: Secret::new(value),
			issued_at,
			expires_at: issued_at.saturating_add(expires_in),
		}
	}

	/// Computes the freshness at `instant` using `margin` as the safety buffer.
	pub fn status_at(&self, instant: OffsetDateTime, margin: Duration) -> TokenStatus {
		if instant >= self.expires_at {
			return TokenStatus::Expired;
		}
		if instant >= self.expires_at.saturating_sub(margin) {
			return TokenStatus::Stale;
		}

		TokenStatus::Fresh
	}

	/// Returns `true` if the token may be attached to a request at `instant`.
	pub fn is_usable_at(&self, instant: OffsetDateTime, margin: Duration) -> bool {
		matches!(self.status_at(instant, margin), TokenStatus::Fresh)
	}

	/// Returns the bearer value.
	pub fn secret(&self) -> &str {
		self.value.expose()
	}

	/// Remaining lifetime at `instant` (negative once expired).
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		self.expires_at - instant
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("kind", &self.kind)
			.field("value", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	fn token() -> AccessToken {
		AccessToken::new(
			TokenKind::Tenant,
			"T1",
			macros::datetime!(2025-01-01 00:00 UTC),
			Duration::seconds(7200),
		)
	}

	#[test]
	fn status_honours_the_safety_margin() {
		let token = token();
		let margin = Duration::seconds(30);

		assert_eq!(token.expires_at, macros::datetime!(2025-01-01 02:00 UTC));
		assert_eq!(
			token.status_at(macros::datetime!(2025-01-01 01:59:29 UTC), margin),
			TokenStatus::Fresh
		);
		assert_eq!(
			token.status_at(macros::datetime!(2025-01-01 01:59:30 UTC), margin),
			TokenStatus::Stale
		);
		assert_eq!(
			token.status_at(macros::datetime!(2025-01-01 02:00 UTC), margin),
			TokenStatus::Expired
		);
		assert!(!token.is_usable_at(macros::datetime!(2025-01-01 01:59:45 UTC), margin));
		assert!(token.is_usable_at(macros::datetime!(2025-01-01 01:59:45 UTC), Duration::ZERO));
	}

	#[test]
	fn oversized_lifetimes_saturate() {
		let issued_at = macros::datetime!(2025-01-01 00:00 UTC);
		let token = AccessToken::new(TokenKind::App, "A1", issued_at, Duration::MAX);

		assert!(token.expires_at > issued_at);
		assert!(token.is_usable_at(issued_at, Duration::days(365)));
		assert!(!token.is_usable_at(issued_at, Duration::MAX));
	}

	#[test]
	fn debug_redacts_the_bearer_value() {
		let rendered = format!("{:?}", token());

		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains("T1"));
	}

	#[test]
	fn kinds_map_to_identity_endpoints() {
		assert_eq!(
			TokenKind::Tenant.endpoint_path(),
			"/open-apis/auth/v3/tenant_access_token/internal/"
		);
		assert_eq!(TokenKind::App.as_str(), "app_access_token");
		assert_eq!(TokenKind::App.operation(), "auth.app_access_token");
	}
}
