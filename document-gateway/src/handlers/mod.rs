pub mod app;
pub mod archive;
pub mod auth;
pub mod document_files;
pub mod documents;
pub mod files;
pub mod notifications;
pub mod users;
