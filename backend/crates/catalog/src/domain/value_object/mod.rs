//! Value Object Module

pub mod slug;
