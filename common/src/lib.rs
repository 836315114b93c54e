//! Types and pure logic shared by the console frontend and its host server.
//!
//! Nothing in this crate performs I/O. The frontend executes the
//! [`workflow::Command`]s the state machine hands back and feeds the outcome
//! in as new transitions, which keeps every rule in here testable natively.

pub mod activity;
pub mod api;
pub mod jobs;
pub mod model;
pub mod requests;
pub mod schema;
pub mod workflow;
