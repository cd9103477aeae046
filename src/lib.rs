pub mod fetch;
pub mod router;
pub mod auth;
pub mod payments;
pub mod env;
pub mod config;
pub mod harness;

pub use harness::*;
