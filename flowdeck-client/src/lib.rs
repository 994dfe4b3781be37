//! REST gateway and board session for flowdeck.
//!
//! `gateway` defines the consumed backend interface plus its reqwest
//! implementation; `session` owns one board's snapshot for the lifetime of
//! a detail view and runs every mutation through the two-branch contract:
//! success merges server truth into local state, failure reverts the one
//! optimistic mutation (cross-list card moves) or leaves state untouched.

pub mod gateway;
pub mod session;

pub use gateway::{BoardGateway, GatewayError};
pub use gateway::rest::RestGateway;
pub use session::{BoardSession, SessionError};
