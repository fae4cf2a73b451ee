//! Client-side core of the Coverdesk insurance portal.
//!
//! Holds everything the terminal front-end needs that is not rendering:
//! the session store and its persistence, the route table and navigation
//! policy, the reqwest gateway with bearer injection and 401 recovery, the
//! typed portal API surface, and the view services for loading linkable
//! items and submitting support tickets.

pub mod config;
pub mod dates;
pub mod domain;
pub mod models;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
