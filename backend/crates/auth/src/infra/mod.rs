//! Infrastructure Layer
//!
//! Database implementations.

#[cfg(test)]
pub(crate) mod memory;
pub mod postgres;

pub use postgres::PgAuthRepository;
