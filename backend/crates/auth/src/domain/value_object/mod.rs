//! Value Object Module

pub mod email;
pub mod user_name;
