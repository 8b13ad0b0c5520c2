//! Repository Traits

use kernel::id::ProductId;

use crate::domain::entity::product::Product;
use crate::domain::value_object::slug::Slug;
use crate::error::CatalogResult;

#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// A concurrent insert with the same slug is `SlugTaken`
    async fn insert_product(&self, product: &Product) -> CatalogResult<()>;

    /// Live products only
    async fn find_product(&self, product_id: &ProductId) -> CatalogResult<Option<Product>>;

    /// Every live product, oldest first
    async fn list_products(&self) -> CatalogResult<Vec<Product>>;

    /// Returns `false` when the product is gone
    async fn update_product(&self, product: &Product) -> CatalogResult<bool>;

    /// Returns `false` when the product is already gone
    async fn soft_delete_product(&self, product_id: &ProductId) -> CatalogResult<bool>;

    /// Whether any stored product other than `except` uses `slug`,
    /// soft-deleted products included
    async fn slug_taken(&self, slug: &Slug, except: Option<&ProductId>) -> CatalogResult<bool>;
}
