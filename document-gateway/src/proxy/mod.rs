//! The forwarding contract shared by every route: what goes out to the
//! backend and how its answer is turned back into a response.

pub mod request;
pub mod response;

pub use request::{segment, Credentials, ForwardRequest};
pub use response::{error_from_body, normalize_envelope, DOWNLOAD_CACHE_CONTROL};
