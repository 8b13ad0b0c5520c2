//! Order Entities
//!
//! An order and its items are written together and never modified by this
//! crate afterwards. Item prices are snapshots of the product price at
//! placement time.

use chrono::{DateTime, Utc};
use kernel::FieldErrors;
use kernel::id::{OrderId, OrderItemId, ProductId, UserId};
use rust_decimal::Decimal;

pub const STATUS_PENDING: &str = "pending";

pub const ITEMS_FIELD: &str = "items";
pub const ITEMS_REQUIRED: &str = "At least one item is required";
pub const QUANTITY_NOT_POSITIVE: &str = "Quantity must be greater than 0";

fn quantity_field(index: usize) -> String {
    format!("items[{index}].quantity")
}

/// Line rules that hold regardless of the products involved: at least one
/// line, every quantity positive
pub fn check_line_quantities(quantities: impl IntoIterator<Item = i32>, errors: &mut FieldErrors) {
    let mut count = 0;
    for (i, quantity) in quantities.into_iter().enumerate() {
        errors.check(quantity <= 0, &quantity_field(i), QUANTITY_NOT_POSITIVE);
        count += 1;
    }
    errors.check(count == 0, ITEMS_FIELD, ITEMS_REQUIRED);
}

/// One requested line: product and quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub item_id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    /// Zero-based position in the request
    pub line_no: i32,
    pub quantity: i32,
    pub price: Decimal,
}

impl OrderItem {
    /// `None` when `price * quantity` does not fit in a `Decimal`
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order_id: OrderId,
    pub buyer_id: UserId,
    pub order_date: DateTime<Utc>,
    pub total: Decimal,
    pub status: String,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Empty pending order for `buyer_id`
    pub fn pending(buyer_id: UserId) -> Self {
        Self {
            order_id: OrderId::new(),
            buyer_id,
            order_date: Utc::now(),
            total: Decimal::ZERO,
            status: STATUS_PENDING.to_string(),
            items: Vec::new(),
        }
    }

    /// Append an item priced at `price` and add it to the total
    ///
    /// Returns `None`, leaving the order unchanged, when the new total is not
    /// representable.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: i32,
        price: Decimal,
    ) -> Option<&OrderItem> {
        let line_no = i32::try_from(self.items.len()).ok()?;
        let item = OrderItem {
            item_id: OrderItemId::new(),
            order_id: self.order_id,
            product_id,
            line_no,
            quantity,
            price,
        };
        self.total = item
            .line_total()
            .and_then(|line| self.total.checked_add(line))?;
        self.items.push(item);
        self.items.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_sum_of_line_totals() {
        let mut order = Order::pending(UserId::new());
        order.add_item(ProductId::new(), 2, Decimal::new(1000, 2));
        order.add_item(ProductId::new(), 3, Decimal::new(199, 2));

        assert_eq!(order.total, Decimal::new(2597, 2));
        assert_eq!(order.status, STATUS_PENDING);
        assert_eq!(order.items[1].line_no, 1);
        assert!(order.items.iter().all(|i| i.order_id == order.order_id));
    }

    #[test]
    fn test_line_quantity_rules() {
        let mut errors = FieldErrors::new();
        check_line_quantities([2, 0, -1], &mut errors);
        assert_eq!(errors.get("items[0].quantity"), None);
        assert_eq!(errors.get("items[1].quantity"), Some(QUANTITY_NOT_POSITIVE));
        assert_eq!(errors.get("items[2].quantity"), Some(QUANTITY_NOT_POSITIVE));
        assert_eq!(errors.get(ITEMS_FIELD), None);

        let mut errors = FieldErrors::new();
        check_line_quantities([], &mut errors);
        assert_eq!(errors.get(ITEMS_FIELD), Some(ITEMS_REQUIRED));
    }

    #[test]
    fn test_large_totals_are_exact() {
        let mut order = Order::pending(UserId::new());
        let top_price = Decimal::new(99_999_999_99, 2);
        order.add_item(ProductId::new(), i32::MAX, top_price).unwrap();
        order.add_item(ProductId::new(), i32::MAX, top_price).unwrap();

        let line = top_price * Decimal::from(i32::MAX);
        assert_eq!(order.total, line + line);
    }

    #[test]
    fn test_unrepresentable_total_leaves_order_unchanged() {
        let mut order = Order::pending(UserId::new());
        order.add_item(ProductId::new(), 1, Decimal::new(1000, 2)).unwrap();

        assert!(order.add_item(ProductId::new(), 2, Decimal::MAX).is_none());
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total, Decimal::new(1000, 2));
    }
}
