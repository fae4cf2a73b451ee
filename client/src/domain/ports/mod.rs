//! Ports owned by the domain, implemented by outbound adapters.

mod macros;
mod portal_api;
mod session_vault;

pub(crate) use macros::define_port_error;
pub use portal_api::{PortalApi, PortalApiError};
pub use session_vault::{
    InMemorySessionVault, PersistedSession, SessionVault, SessionVaultError,
};

#[cfg(test)]
pub use portal_api::MockPortalApi;
#[cfg(test)]
pub use session_vault::MockSessionVault;
