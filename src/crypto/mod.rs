//! Cryptographic functions for the finance tracker
//!
//! Provides Argon2id password hashing with per-user salts and a zeroizing
//! string type for passwords held in memory.

pub mod password;
pub mod secure_memory;

pub use password::{hash_password, verify_password, PasswordParams};
pub use secure_memory::SecureString;
