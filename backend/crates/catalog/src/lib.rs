//! Product Catalog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Product entity, slug value object, repository trait
//! - `application/` - Catalog use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Rules
//! - Products are created by sellers (or admins) and owned by their creator
//! - Only the owner or an admin may update or delete a product
//! - Slugs are unique across every product ever stored, soft-deleted ones
//!   included; collisions get a numeric suffix (`red-shirt-2`)
//! - Delete is a soft delete

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgProductRepository;
pub use presentation::handlers::CatalogAppState;
pub use presentation::router::{catalog_router, catalog_router_generic};
