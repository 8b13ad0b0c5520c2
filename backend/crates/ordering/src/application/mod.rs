//! Application Layer

pub mod create;
pub mod list;
pub mod view;

pub use create::CreateOrderUseCase;
pub use list::ListOrdersUseCase;
pub use view::{OrderItemView, OrderView};
