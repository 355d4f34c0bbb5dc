//! # Domain Services
//!
//! Domain-level seams that don't belong to a single entity.

pub mod password;

pub use password::{Argon2PasswordEncoder, PasswordEncoder};

#[cfg(test)]
pub use password::MockPasswordEncoder;
