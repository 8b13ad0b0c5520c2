//! Store Traits
//!
//! Order placement runs against an [`OrderTransaction`] obtained from an
//! [`OrderUnitOfWork`]. Dropping a transaction without calling
//! [`OrderTransaction::commit`] discards every change made through it.

use std::future::Future;

use kernel::id::{ProductId, UserId};

use crate::domain::entity::order::{Order, OrderItem};
use crate::domain::entity::stock::{Buyer, ProductStock};
use crate::error::OrderResult;

#[trait_variant::make(OrderTransaction: Send)]
pub trait LocalOrderTransaction {
    /// Live user joined with their role name
    async fn find_buyer(&mut self, user_id: &UserId) -> OrderResult<Option<Buyer>>;

    /// Live product, locked until the transaction ends
    async fn lock_product(&mut self, product_id: &ProductId) -> OrderResult<Option<ProductStock>>;

    /// `stock -= quantity` only when `stock >= quantity`; `false` otherwise
    async fn decrement_stock(&mut self, product_id: &ProductId, quantity: i32) -> OrderResult<bool>;

    /// Order header only
    async fn insert_order(&mut self, order: &Order) -> OrderResult<()>;

    async fn insert_order_item(&mut self, item: &OrderItem) -> OrderResult<()>;

    async fn commit(self) -> OrderResult<()>;
}

/// Source of order transactions
pub trait OrderUnitOfWork: Send + Sync + 'static {
    type Tx: OrderTransaction;

    fn begin(&self) -> impl Future<Output = OrderResult<Self::Tx>> + Send;
}

/// Order read paths
#[trait_variant::make(OrderReader: Send)]
pub trait LocalOrderReader {
    /// Orders with their items, newest first; only `buyer_id`'s when given
    async fn list_orders(&self, buyer_id: Option<&UserId>) -> OrderResult<Vec<Order>>;

    /// Name of a live product
    async fn find_product_name(&self, product_id: &ProductId) -> OrderResult<Option<String>>;
}

/// Everything the ordering HTTP layer needs from one store
pub trait OrderStore: OrderUnitOfWork + OrderReader + Send + Sync + 'static {}

impl<T> OrderStore for T where T: OrderUnitOfWork + OrderReader + Send + Sync + 'static {}
