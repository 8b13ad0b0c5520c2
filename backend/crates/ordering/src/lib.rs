//! Ordering Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Order entities, unit-of-work and reader traits
//! - `application/` - Order placement and order listing
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Order placement
//! One store transaction covers the buyer check, every stock decrement and
//! the order/item inserts. Lines are processed in request order; the first
//! failing line aborts the transaction so no earlier decrement survives.
//! Stock is decremented conditionally (`stock >= quantity`) on a locked row,
//! so concurrent orders can never drive it negative.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use error::{OrderError, OrderResult};
pub use infra::postgres::PgOrderStore;
pub use presentation::handlers::OrderingAppState;
pub use presentation::router::{ordering_router, ordering_router_generic};
