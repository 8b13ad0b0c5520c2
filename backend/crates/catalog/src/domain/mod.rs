//! Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::product::{Product, ProductDraft};
pub use repository::ProductRepository;
pub use value_object::slug::Slug;
