//! Create Order Use Case
//!
//! Buyer check, stock checks, conditional decrements and inserts all happen
//! inside one transaction. Returning early with `?` drops the transaction,
//! which rolls everything back.

use std::sync::Arc;

use kernel::FieldErrors;
use kernel::id::UserId;
use kernel::principal::roles;

use crate::application::view::OrderView;
use crate::domain::entity::order::{Order, OrderLine, check_line_quantities};
use crate::domain::repository::{OrderTransaction, OrderUnitOfWork};
use crate::error::{OrderError, OrderResult};

pub struct CreateOrderUseCase<S>
where
    S: OrderUnitOfWork,
{
    store: Arc<S>,
}

impl<S> CreateOrderUseCase<S>
where
    S: OrderUnitOfWork,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, buyer_id: &UserId, lines: &[OrderLine]) -> OrderResult<OrderView> {
        check_lines(lines)?;

        let mut tx = self.store.begin().await?;

        let buyer = tx
            .find_buyer(buyer_id)
            .await?
            .ok_or(OrderError::BuyerNotFound)?;
        if buyer.role != roles::BUYER {
            return Err(OrderError::NotABuyer);
        }

        let mut order = Order::pending(buyer.user_id);
        let mut names = Vec::with_capacity(lines.len());

        for line in lines {
            let product = tx
                .lock_product(&line.product_id)
                .await?
                .ok_or(OrderError::ProductNotFound(line.product_id))?;

            if !product.covers(line.quantity) {
                return Err(OrderError::InsufficientStock(product.name));
            }
            if !tx.decrement_stock(&product.product_id, line.quantity).await? {
                return Err(OrderError::InsufficientStock(product.name));
            }

            order
                .add_item(product.product_id, line.quantity, product.price)
                .ok_or(OrderError::TotalTooLarge)?;
            names.push(product.name);
        }

        tx.insert_order(&order).await?;
        for item in &order.items {
            tx.insert_order_item(item).await?;
        }
        tx.commit().await?;

        tracing::info!(
            order_id = %order.order_id,
            buyer_id = %order.buyer_id,
            items = order.items.len(),
            total = %order.total,
            "Order placed"
        );

        let mut names = names.into_iter();
        Ok(OrderView::new(order, |_| names.next()))
    }
}

fn check_lines(lines: &[OrderLine]) -> OrderResult<()> {
    let mut errors = FieldErrors::new();
    check_line_quantities(lines.iter().map(|line| line.quantity), &mut errors);
    errors.into_result().map_err(OrderError::Validation)
}
