//! Opt-in reader for the `{code, msg}` envelope wrapping platform responses.

// self
use crate::{_prelude::*, error::RemoteApiError};

/// Application codes the platform returns when the bearer token is invalid or expired.
pub const TOKEN_INVALID_CODES: [i64; 4] = [99991661, 99991663, 99991664, 99991668];

/// Leading fields shared by every JSON response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ApiEnvelope {
	/// Application code; `0` means success.
	#[serde(default)]
	pub code: i64,
	/// Human-readable message.
	#[serde(default)]
	pub msg: String,
}
impl ApiEnvelope {
	/// Reads the envelope from a raw response body.
	pub fn parse(body: &[u8]) -> Result<Self, RemoteApiError> {
		let mut deserializer = serde_json::Deserializer::from_slice(body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| RemoteApiError::MalformedBody { source })
	}

	/// Parses `body` and turns a non-zero code into [`RemoteApiError::Code`].
	pub fn check(body: &[u8]) -> Result<Self> {
		let envelope = Self::parse(body)?;

		if envelope.code != 0 {
			return Err(RemoteApiError::Code { code: envelope.code, message: envelope.msg }.into());
		}

		Ok(envelope)
	}

	/// Returns `true` for a zero code.
	pub fn is_success(&self) -> bool {
		self.code == 0
	}

	/// Returns `true` when the code reports an invalid or expired access token.
	pub fn is_token_invalid(&self) -> bool {
		TOKEN_INVALID_CODES.contains(&self.code)
	}
}
