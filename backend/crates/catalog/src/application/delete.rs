//! Delete Product Use Case
//!
//! Soft delete: the row stays (and keeps its slug) but disappears from every
//! read path.

use std::sync::Arc;

use kernel::id::ProductId;
use kernel::principal::Principal;

use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct DeleteProductUseCase<P>
where
    P: ProductRepository,
{
    repo: Arc<P>,
}

impl<P> DeleteProductUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, caller: &Principal, product_id: &ProductId) -> CatalogResult<()> {
        let product = self
            .repo
            .find_product(product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound)?;

        if !product.can_be_managed_by(caller) {
            return Err(CatalogError::NotOwner);
        }

        if !self.repo.soft_delete_product(product_id).await? {
            return Err(CatalogError::ProductNotFound);
        }

        tracing::info!(product_id = %product_id, user_id = %caller.user_id, "Product deleted");
        Ok(())
    }
}
