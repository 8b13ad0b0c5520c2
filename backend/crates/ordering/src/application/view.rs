//! Read projections returned by use cases

use chrono::{DateTime, Utc};
use kernel::id::{OrderId, OrderItemId, ProductId, UserId};
use rust_decimal::Decimal;

use crate::domain::entity::order::{Order, OrderItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemView {
    pub item_id: OrderItemId,
    pub product_id: ProductId,
    /// `None` when the product no longer exists
    pub product_name: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderView {
    pub order_id: OrderId,
    pub buyer_id: UserId,
    pub order_date: DateTime<Utc>,
    pub total: Decimal,
    pub status: String,
    pub items: Vec<OrderItemView>,
}

impl OrderView {
    /// `name_of` supplies each item's product name
    pub fn new(order: Order, mut name_of: impl FnMut(&OrderItem) -> Option<String>) -> Self {
        let items = order
            .items
            .iter()
            .map(|item| OrderItemView {
                item_id: item.item_id,
                product_id: item.product_id,
                product_name: name_of(item),
                quantity: item.quantity,
                price: item.price,
            })
            .collect();

        Self {
            order_id: order.order_id,
            buyer_id: order.buyer_id,
            order_date: order.order_date,
            total: order.total,
            status: order.status,
            items,
        }
    }
}
