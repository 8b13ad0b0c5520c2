//! Entity Module

pub mod refresh_token;
pub mod role;
pub mod user;
