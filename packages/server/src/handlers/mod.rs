pub mod auth;
pub mod download;
pub mod specimen;
pub mod tissue_request;
pub mod upload;
