//! Entity Module

pub mod product;
