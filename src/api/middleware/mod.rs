//! API middleware components

pub mod session;

pub use session::{session_cookie, session_set_cookie, CurrentIdentity};
