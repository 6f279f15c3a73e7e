//! Lambda handlers and AWS adapters for the home energy coach pipeline.
//!
//! Handler cores are synchronous and talk to storage through the traits in
//! [`adapters`]; the binaries under `src/bin` wire those traits to the AWS
//! SDK clients.

pub mod adapters;
pub mod config;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod logging;
pub mod response;
