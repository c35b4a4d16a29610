//! Application Layer
//!
//! The account service (use cases over the repository trait), the token
//! codec, and runtime configuration.

pub mod config;
pub mod service;
pub mod token;
