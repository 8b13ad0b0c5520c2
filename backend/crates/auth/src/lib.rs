//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Token service and session use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, access middleware
//!
//! ## Features
//! - Registration with the default `buyer` role
//! - Login issuing a short-lived access token and a long-lived refresh token
//! - Single-use refresh token rotation
//! - Logout revoking every refresh token of the user
//! - Access middleware resolving an explicit `Principal` and consulting the
//!   policy oracle
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - HS256 tokens; access and refresh secrets are distinct
//! - Refresh tokens are stored only as SHA-256 digests keyed by `jti`
//! - Every token failure surfaces as the same 401

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenService;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::{AccessGate, require_permission};
pub use presentation::router::{auth_router, auth_router_generic};
pub use presentation::AuthAppState;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
