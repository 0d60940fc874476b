//! Token verification and per-request capability checks.

pub mod capabilities;
pub mod claims;

pub use capabilities::{Capabilities, ClaimCapabilities, RequestCapabilities};
pub use claims::{AccessClaims, TokenVerifier};
