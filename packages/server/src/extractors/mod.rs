pub mod json;
pub mod permission;
