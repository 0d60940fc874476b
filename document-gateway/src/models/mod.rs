pub mod document;
pub mod user;

pub use document::{BulkDocumentIds, DocumentFileMetadata, ShareDocumentRequest, ShareRequest};
pub use user::{BackendUser, UserSummary};
