pub mod client_info;
pub mod response;
