//! Application Layer
//!
//! Catalog use cases.

pub mod create;
pub mod delete;
pub mod query;
pub mod slug;
pub mod update;

pub use create::CreateProductUseCase;
pub use delete::DeleteProductUseCase;
pub use query::{GetProductUseCase, ListProductsUseCase};
pub use update::UpdateProductUseCase;
