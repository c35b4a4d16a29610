//! Presentation Layer
//!
//! HTTP surface: DTOs, handlers, the auth-gate middleware, and router
//! construction.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
