//! Core domain types and board snapshot logic for flowdeck.
//!
//! This crate is network-free: it holds the denormalized board tree
//! (board -> lists -> cards -> comments), the array mechanics used by
//! drag-and-drop relocation, and the change events emitted whenever the
//! snapshot mutates. The REST gateway and the session orchestrating
//! optimistic updates live in `flowdeck-client`.

pub mod relocate;
pub mod snapshot;
pub mod types;
