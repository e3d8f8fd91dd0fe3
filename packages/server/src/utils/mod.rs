pub mod catalog;
pub mod hash;
pub mod jwt;
pub mod specimen;
pub mod store;
