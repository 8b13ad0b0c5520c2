//! API DTOs

use kernel::FieldErrors;
use kernel::id::ProductId;
use kernel::validation::Validate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::view::{OrderItemView, OrderView};
use crate::domain::entity::order::{OrderLine, check_line_quantities};

const PRODUCT_ID_REQUIRED: &str = "Product ID is required";
const PRODUCT_ID_INVALID: &str = "Product ID must be a valid UUID";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: i32,
}

/// Body of `POST /orders`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
}

impl CreateOrderRequest {
    /// Requested lines in request order
    pub fn lines(&self) -> Result<Vec<OrderLine>, FieldErrors> {
        self.validate()?;
        let mut lines = Vec::with_capacity(self.items.len());
        for (i, item) in self.items.iter().enumerate() {
            let product_id = ProductId::parse_str(item.product_id.trim()).map_err(|_| {
                let mut errors = FieldErrors::new();
                errors.add(format!("items[{i}].product_id"), PRODUCT_ID_INVALID);
                errors
            })?;
            lines.push(OrderLine {
                product_id,
                quantity: item.quantity,
            });
        }
        Ok(lines)
    }
}

impl Validate for CreateOrderRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_line_quantities(self.items.iter().map(|item| item.quantity), &mut errors);

        for (i, item) in self.items.iter().enumerate() {
            let product_id = item.product_id.trim();
            let field = format!("items[{i}].product_id");
            errors.check(product_id.is_empty(), &field, PRODUCT_ID_REQUIRED);
            errors.check(
                ProductId::parse_str(product_id).is_err(),
                &field,
                PRODUCT_ID_INVALID,
            );
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItemResponse {
    pub id: String,
    pub product_id: String,
    /// `null` when the product no longer exists
    pub product_name: Option<String>,
    pub quantity: i32,
    /// Unit price at the time the order was placed
    pub price: Decimal,
}

impl From<OrderItemView> for OrderItemResponse {
    fn from(item: OrderItemView) -> Self {
        Self {
            id: item.item_id.to_string(),
            product_id: item.product_id.to_string(),
            product_name: item.product_name,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderResponse {
    pub id: String,
    pub buyer_id: String,
    /// RFC 3339
    pub order_date: String,
    pub total: Decimal,
    pub status: String,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderView> for OrderResponse {
    fn from(order: OrderView) -> Self {
        Self {
            id: order.order_id.to_string(),
            buyer_id: order.buyer_id.to_string(),
            order_date: order.order_date.to_rfc3339(),
            total: order.total,
            status: order.status,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_order_is_rejected() {
        let req: CreateOrderRequest = serde_json::from_str("{}").unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.get("items"), Some("At least one item is required"));
    }

    #[test]
    fn test_item_errors_are_indexed() {
        let req: CreateOrderRequest = serde_json::from_str(
            r#"{"items":[{"product_id":"not-a-uuid","quantity":1},{"quantity":0}]}"#,
        )
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(
            errors.get("items[0].product_id"),
            Some("Product ID must be a valid UUID")
        );
        assert_eq!(errors.get("items[1].product_id"), Some("Product ID is required"));
        assert_eq!(
            errors.get("items[1].quantity"),
            Some("Quantity must be greater than 0")
        );
        assert!(errors.get("items[0].quantity").is_none());
    }

    #[test]
    fn test_lines_keep_request_order() {
        let a = ProductId::new();
        let b = ProductId::new();
        let req = CreateOrderRequest {
            items: vec![
                OrderItemRequest {
                    product_id: a.to_string(),
                    quantity: 2,
                },
                OrderItemRequest {
                    product_id: b.to_string(),
                    quantity: 1,
                },
            ],
        };
        let lines = req.lines().unwrap();
        assert_eq!(lines[0].product_id, a);
        assert_eq!(lines[1].quantity, 1);
    }
}
