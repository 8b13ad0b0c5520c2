//! List Orders Use Case
//!
//! Buyers see their own orders; every other role sees all of them. Item
//! names are looked up per product; a product that no longer exists yields
//! no name rather than failing the listing.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::ProductId;
use kernel::principal::Principal;

use crate::application::view::OrderView;
use crate::domain::repository::OrderReader;
use crate::error::OrderResult;

pub struct ListOrdersUseCase<R>
where
    R: OrderReader,
{
    reader: Arc<R>,
}

impl<R> ListOrdersUseCase<R>
where
    R: OrderReader,
{
    pub fn new(reader: Arc<R>) -> Self {
        Self { reader }
    }

    pub async fn execute(&self, caller: &Principal) -> OrderResult<Vec<OrderView>> {
        let scope = caller.is_buyer().then_some(&caller.user_id);
        let orders = self.reader.list_orders(scope).await?;

        let mut names: HashMap<ProductId, Option<String>> = HashMap::new();
        for item in orders.iter().flat_map(|o| o.items.iter()) {
            if names.contains_key(&item.product_id) {
                continue;
            }
            let name = self.reader.find_product_name(&item.product_id).await?;
            if name.is_none() {
                tracing::warn!(product_id = %item.product_id, "Ordered product no longer exists");
            }
            names.insert(item.product_id, name);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                OrderView::new(order, |item| names.get(&item.product_id).cloned().flatten())
            })
            .collect())
    }
}
