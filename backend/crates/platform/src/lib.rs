//! Platform Infrastructure
//!
//! Cross-cutting infrastructure shared by feature crates:
//! - `password` - Argon2id password hashing and verification
//! - `cookie` - session-carrier cookie building and extraction
//! - `keys` - ECDSA PEM key-pair loading for token signing

pub mod cookie;
pub mod keys;
pub mod password;
