//! Classification of transport failures into client errors.

// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	http::HttpClientError,
};

/// Maps HTTP transport failures into client [`Error`] values.
///
/// `operation` is the stable label of the call that failed (for example `message.send` or
/// `auth.tenant_access_token`) and should be carried into the produced error.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a client error.
	fn map_transport_error(&self, operation: &'static str, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		operation: &'static str,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(operation, *inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => map_generic_transport_error(operation, message),
			_ => map_generic_transport_error(operation, "unrecognized transport failure"),
		}
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(operation: &'static str, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransportError::timeout(operation, err).into();
	}

	TransportError::network(operation, err).into()
}

#[cfg(feature = "reqwest")]
fn map_generic_transport_error(operation: &'static str, message: impl Display) -> Error {
	TransportError::Other { operation, message: message.to_string() }.into()
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;

	#[test]
	fn io_and_other_failures_keep_their_category() {
		let mapper = ReqwestTransportErrorMapper;
		let io = mapper.map_transport_error(
			"message.send",
			HttpClientError::Io(std::io::Error::other("socket closed")),
		);
		let other = mapper
			.map_transport_error("message.send", HttpClientError::Other("connection reset".into()));

		assert!(matches!(io, Error::Transport(TransportError::Io(_))));

		match other {
			Error::Transport(TransportError::Other { operation, message }) => {
				assert_eq!(operation, "message.send");
				assert_eq!(message, "connection reset");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}
}
