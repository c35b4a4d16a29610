//! Domain Layer
//!
//! Entities, value objects, and the repository trait. No I/O here;
//! persistence lives in the infrastructure layer.

pub mod entity;
pub mod repository;
pub mod value_object;
