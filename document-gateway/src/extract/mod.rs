//! Request adapters: who the caller is and what they sent.

pub mod body;
pub mod session;

pub use body::{JsonBody, ValidatedJson};
pub use session::{BearerCaller, SessionCaller};
