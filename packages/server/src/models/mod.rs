pub mod auth;
pub mod specimen;
pub mod tissue_request;
