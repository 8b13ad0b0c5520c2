//! Rows read inside an order transaction

use kernel::id::{ProductId, UserId};
use rust_decimal::Decimal;

/// User placing the order, with the name of their role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buyer {
    pub user_id: UserId,
    pub role: String,
}

/// Live product row, locked for the rest of the transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductStock {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}

impl ProductStock {
    pub fn covers(&self, quantity: i32) -> bool {
        quantity <= self.stock
    }
}
