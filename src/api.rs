//! Endpoint functions grouped by platform capability.
//!
//! Every handle borrows an [`App`] and exposes one async method per REST operation. Payloads
//! are serialized as given and responses are returned as raw bytes; use
//! [`ApiEnvelope`](envelope::ApiEnvelope) to inspect the `{code, msg}` envelope when needed.

pub mod calendar;
pub mod contact;
pub mod document;
pub mod envelope;
pub mod message;
pub mod user_group;

pub use calendar::Calendar;
pub use contact::Contact;
pub use document::Document;
pub use envelope::*;
pub use message::{ImageUpload, Message};
pub use user_group::UserGroup;

macro_rules! def_api {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		pub struct $name<'a, C, M>
		where
			C: ?Sized + $crate::http::ApiHttpClient,
			M: ?Sized + $crate::transport::TransportErrorMapper<C::TransportError>,
		{
			app: &'a $crate::app::App<C, M>,
		}
		impl<'a, C, M> $name<'a, C, M>
		where
			C: ?Sized + $crate::http::ApiHttpClient,
			M: ?Sized + $crate::transport::TransportErrorMapper<C::TransportError>,
		{
			pub(crate) fn new(app: &'a $crate::app::App<C, M>) -> Self {
				Self { app }
			}
		}
		impl<C, M> Clone for $name<'_, C, M>
		where
			C: ?Sized + $crate::http::ApiHttpClient,
			M: ?Sized + $crate::transport::TransportErrorMapper<C::TransportError>,
		{
			fn clone(&self) -> Self {
				*self
			}
		}
		impl<C, M> Copy for $name<'_, C, M>
		where
			C: ?Sized + $crate::http::ApiHttpClient,
			M: ?Sized + $crate::transport::TransportErrorMapper<C::TransportError>,
		{
		}
		impl<C, M> std::fmt::Debug for $name<'_, C, M>
		where
			C: ?Sized + $crate::http::ApiHttpClient,
			M: ?Sized + $crate::transport::TransportErrorMapper<C::TransportError>,
		{
			fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
				f.debug_struct(stringify!($name)).field("app", self.app).finish()
			}
		}
	};
}
use def_api;
