//! Product read paths

use std::sync::Arc;

use kernel::id::ProductId;

use crate::domain::entity::product::Product;
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct GetProductUseCase<P>
where
    P: ProductRepository,
{
    repo: Arc<P>,
}

impl<P> GetProductUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, product_id: &ProductId) -> CatalogResult<Product> {
        self.repo
            .find_product(product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound)
    }
}

pub struct ListProductsUseCase<P>
where
    P: ProductRepository,
{
    repo: Arc<P>,
}

impl<P> ListProductsUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> CatalogResult<Vec<Product>> {
        self.repo.list_products().await
    }
}
