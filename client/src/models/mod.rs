//! Read-only view models mirroring backend entities.
//!
//! Everything here is fetched from the portal API and never mutated locally
//! except by re-fetch. Wire format is camelCase JSON; date and time values
//! stay as the strings the backend sends and are parsed only for display
//! (see [`crate::dates`]).

mod claim;
mod policy;
mod support;
mod user;

pub use claim::{Claim, ClaimStatus, ClaimStatusUpdate, NewClaim};
pub use policy::{Policy, PolicyStatus, RenewablePolicy, UserPolicy};
pub use support::{
    SupportTicket, TicketClaimDetails, TicketDraft, TicketStatus, TicketUpdate,
};
pub use user::{AuthResponse, Registration, Role, User};
