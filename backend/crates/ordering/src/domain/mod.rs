//! Domain Layer

pub mod entity;
pub mod repository;

pub use entity::order::{Order, OrderItem, OrderLine, STATUS_PENDING};
pub use entity::stock::{Buyer, ProductStock};
pub use repository::{OrderReader, OrderStore, OrderTransaction, OrderUnitOfWork};
