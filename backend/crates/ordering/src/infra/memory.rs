//! In-memory order store for tests
//!
//! A transaction holds the store lock for its whole lifetime and works on a
//! copy of the state; commit swaps the copy in, drop throws it away.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::{ProductId, UserId};
use rust_decimal::Decimal;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::entity::order::{Order, OrderItem};
use crate::domain::entity::stock::{Buyer, ProductStock};
use crate::domain::repository::{OrderReader, OrderTransaction, OrderUnitOfWork};
use crate::error::{OrderError, OrderResult};

#[derive(Clone, Default)]
struct State {
    users: HashMap<UserId, String>,
    products: HashMap<ProductId, (ProductStock, bool)>,
    orders: Vec<Order>,
}

#[derive(Clone, Default)]
pub(crate) struct MemoryOrderStore {
    state: Arc<Mutex<State>>,
}

impl MemoryOrderStore {
    pub async fn add_user(&self, role: &str) -> UserId {
        let user_id = UserId::new();
        self.state.lock().await.users.insert(user_id, role.to_string());
        user_id
    }

    pub async fn add_product(&self, name: &str, price: Decimal, stock: i32) -> ProductId {
        let product_id = ProductId::new();
        let product = ProductStock {
            product_id,
            name: name.to_string(),
            price,
            stock,
        };
        self.state
            .lock()
            .await
            .products
            .insert(product_id, (product, false));
        product_id
    }

    pub async fn stock_of(&self, product_id: &ProductId) -> i32 {
        self.state.lock().await.products[product_id].0.stock
    }

    pub async fn set_price(&self, product_id: &ProductId, price: Decimal) {
        if let Some((product, _)) = self.state.lock().await.products.get_mut(product_id) {
            product.price = price;
        }
    }

    pub async fn delete_product(&self, product_id: &ProductId) {
        if let Some((_, deleted)) = self.state.lock().await.products.get_mut(product_id) {
            *deleted = true;
        }
    }

    pub async fn order_count(&self) -> usize {
        self.state.lock().await.orders.len()
    }
}

pub(crate) struct MemoryOrderTransaction {
    guard: OwnedMutexGuard<State>,
    work: State,
}

impl OrderUnitOfWork for MemoryOrderStore {
    type Tx = MemoryOrderTransaction;

    async fn begin(&self) -> OrderResult<MemoryOrderTransaction> {
        let guard = self.state.clone().lock_owned().await;
        let work = guard.clone();
        Ok(MemoryOrderTransaction { guard, work })
    }
}

impl OrderTransaction for MemoryOrderTransaction {
    async fn find_buyer(&mut self, user_id: &UserId) -> OrderResult<Option<Buyer>> {
        Ok(self.work.users.get(user_id).map(|role| Buyer {
            user_id: *user_id,
            role: role.clone(),
        }))
    }

    async fn lock_product(&mut self, product_id: &ProductId) -> OrderResult<Option<ProductStock>> {
        Ok(self
            .work
            .products
            .get(product_id)
            .filter(|(_, deleted)| !deleted)
            .map(|(product, _)| product.clone()))
    }

    async fn decrement_stock(&mut self, product_id: &ProductId, quantity: i32) -> OrderResult<bool> {
        match self.work.products.get_mut(product_id) {
            Some((product, false)) if product.stock >= quantity => {
                product.stock -= quantity;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn insert_order(&mut self, order: &Order) -> OrderResult<()> {
        let mut header = order.clone();
        header.items.clear();
        self.work.orders.push(header);
        Ok(())
    }

    async fn insert_order_item(&mut self, item: &OrderItem) -> OrderResult<()> {
        let order = self
            .work
            .orders
            .iter_mut()
            .find(|o| o.order_id == item.order_id)
            .ok_or_else(|| OrderError::Internal("order item without order".to_string()))?;
        order.items.push(item.clone());
        Ok(())
    }

    async fn commit(mut self) -> OrderResult<()> {
        *self.guard = self.work;
        Ok(())
    }
}

impl OrderReader for MemoryOrderStore {
    async fn list_orders(&self, buyer_id: Option<&UserId>) -> OrderResult<Vec<Order>> {
        let state = self.state.lock().await;
        let mut orders: Vec<Order> = state
            .orders
            .iter()
            .filter(|o| buyer_id.is_none_or(|id| &o.buyer_id == id))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(orders)
    }

    async fn find_product_name(&self, product_id: &ProductId) -> OrderResult<Option<String>> {
        let state = self.state.lock().await;
        Ok(state
            .products
            .get(product_id)
            .filter(|(_, deleted)| !deleted)
            .map(|(product, _)| product.name.clone()))
    }
}
