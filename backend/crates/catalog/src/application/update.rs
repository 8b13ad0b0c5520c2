//! Update Product Use Case

use std::sync::Arc;

use kernel::id::ProductId;
use kernel::principal::Principal;

use crate::application::slug::allocate_slug;
use crate::domain::entity::product::{Product, ProductDraft};
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct UpdateProductUseCase<P>
where
    P: ProductRepository,
{
    repo: Arc<P>,
}

impl<P> UpdateProductUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        caller: &Principal,
        product_id: &ProductId,
        draft: ProductDraft,
    ) -> CatalogResult<Product> {
        draft.check()?;
        let draft = draft.normalized();

        let mut product = self
            .repo
            .find_product(product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound)?;

        if !product.can_be_managed_by(caller) {
            return Err(CatalogError::NotOwner);
        }

        let slug = if draft.name == product.name {
            product.slug.clone()
        } else {
            allocate_slug(self.repo.as_ref(), &draft.name, Some(product_id)).await?
        };
        product.apply(draft, slug);

        if !self.repo.update_product(&product).await? {
            return Err(CatalogError::ProductNotFound);
        }

        tracing::info!(
            product_id = %product.product_id,
            user_id = %caller.user_id,
            "Product updated"
        );

        Ok(product)
    }
}
