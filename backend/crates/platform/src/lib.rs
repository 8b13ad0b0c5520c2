//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256 digests, constant-time compare)
//! - Password hashing (Argon2id) behind the [`password::CredentialHasher`] trait
//! - Cookie building and credential extraction
//! - The [`policy::PolicyOracle`] authorization seam
//! - Duration-string parsing for configuration

pub mod cookie;
pub mod crypto;
pub mod duration;
pub mod password;
pub mod policy;
