//! Outbound adapters implementing the domain's ports.

pub mod http;
pub mod storage;

pub use http::HttpPortalApi;
pub use storage::FileSessionVault;
