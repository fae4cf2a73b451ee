//! Domain core: session, navigation policy, and the view services.

pub mod credentials;
pub mod linkable_items;
pub mod navigation;
pub mod ports;
pub mod routes;
pub mod session;
pub mod support_form;
pub mod trace;

pub use credentials::{CredentialsValidationError, LoginCredentials};
pub use linkable_items::LinkableItems;
pub use navigation::{evaluate, NavigationDecision, Navigator};
pub use routes::{RouteSpec, RouteTable, ViewName};
pub use session::{AuthenticatedUser, Session, SessionStore};
pub use support_form::{SupportForm, TICKET_SUBMITTED_MESSAGE};
pub use trace::TraceId;
