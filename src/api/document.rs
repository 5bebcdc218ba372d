//! Docs, sheets and comments.
//!
//! Document endpoints act on behalf of a user, so every method takes the caller's user access
//! token. These tokens are attached as given and never cached; the app's own tenant and app
//! tokens are not consulted.

pub mod comment;
pub mod docs;
pub mod platform;

// self
use crate::api::def_api;

def_api! {
	/// Document endpoints, authorized with caller-supplied user access tokens.
	Document
}
