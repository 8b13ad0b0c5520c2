//! Create Product Use Case

use std::sync::Arc;

use kernel::principal::{Principal, roles};

use crate::application::slug::allocate_slug;
use crate::domain::entity::product::{Product, ProductDraft};
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct CreateProductUseCase<P>
where
    P: ProductRepository,
{
    repo: Arc<P>,
}

impl<P> CreateProductUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    /// The caller becomes the product's seller
    pub async fn execute(&self, caller: &Principal, draft: ProductDraft) -> CatalogResult<Product> {
        if !caller.has_role(roles::SELLER) && !caller.is_admin() {
            return Err(CatalogError::NotASeller);
        }
        draft.check()?;
        let draft = draft.normalized();

        let slug = allocate_slug(self.repo.as_ref(), &draft.name, None).await?;
        let product = Product::new(caller.user_id, draft, slug);
        self.repo.insert_product(&product).await?;

        tracing::info!(
            product_id = %product.product_id,
            seller_id = %product.seller_id,
            slug = %product.slug,
            "Product created"
        );

        Ok(product)
    }
}
