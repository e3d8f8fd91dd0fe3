pub mod admin_account;
pub mod autopsy_type;
pub mod neuropathological_diagnosis;
pub mod other_details;
pub mod prime_details;
pub mod tissue_request;
pub mod tissue_type;
pub mod user_account;
