//! In-memory product store for tests

use std::sync::{Arc, Mutex};

use chrono::Utc;
use kernel::id::ProductId;

use crate::domain::entity::product::Product;
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::slug::Slug;
use crate::error::{CatalogError, CatalogResult};

struct Stored {
    product: Product,
    deleted: bool,
}

#[derive(Clone, Default)]
pub(crate) struct MemoryProductStore {
    products: Arc<Mutex<Vec<Stored>>>,
}

impl MemoryProductStore {
    /// Including soft-deleted rows
    pub fn stored_count(&self) -> usize {
        self.products.lock().unwrap().len()
    }

    pub fn is_soft_deleted(&self, product_id: &ProductId) -> bool {
        self.products
            .lock()
            .unwrap()
            .iter()
            .any(|s| &s.product.product_id == product_id && s.deleted)
    }
}

impl ProductRepository for MemoryProductStore {
    async fn insert_product(&self, product: &Product) -> CatalogResult<()> {
        let mut products = self.products.lock().unwrap();
        if products.iter().any(|s| s.product.slug == product.slug) {
            return Err(CatalogError::SlugTaken);
        }
        products.push(Stored {
            product: product.clone(),
            deleted: false,
        });
        Ok(())
    }

    async fn find_product(&self, product_id: &ProductId) -> CatalogResult<Option<Product>> {
        let products = self.products.lock().unwrap();
        Ok(products
            .iter()
            .find(|s| &s.product.product_id == product_id && !s.deleted)
            .map(|s| s.product.clone()))
    }

    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        let products = self.products.lock().unwrap();
        Ok(products
            .iter()
            .filter(|s| !s.deleted)
            .map(|s| s.product.clone())
            .collect())
    }

    async fn update_product(&self, product: &Product) -> CatalogResult<bool> {
        let mut products = self.products.lock().unwrap();
        if products
            .iter()
            .any(|s| s.product.slug == product.slug && s.product.product_id != product.product_id)
        {
            return Err(CatalogError::SlugTaken);
        }
        match products
            .iter_mut()
            .find(|s| s.product.product_id == product.product_id && !s.deleted)
        {
            Some(stored) => {
                stored.product = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn soft_delete_product(&self, product_id: &ProductId) -> CatalogResult<bool> {
        let mut products = self.products.lock().unwrap();
        match products
            .iter_mut()
            .find(|s| &s.product.product_id == product_id && !s.deleted)
        {
            Some(stored) => {
                stored.deleted = true;
                stored.product.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn slug_taken(&self, slug: &Slug, except: Option<&ProductId>) -> CatalogResult<bool> {
        let products = self.products.lock().unwrap();
        Ok(products
            .iter()
            .any(|s| &s.product.slug == slug && Some(&s.product.product_id) != except))
    }
}
