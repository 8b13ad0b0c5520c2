//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod token;
pub mod view;
pub mod whoami;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use refresh::{RefreshUseCase, TokenPair};
pub use register::{RegisterInput, RegisterUseCase};
pub use token::{AccessTokenClaims, IssuedToken, RefreshTokenClaims, TokenService};
pub use view::UserView;
pub use whoami::WhoAmIUseCase;
