//! API DTOs

use kernel::FieldErrors;
use kernel::validation::Validate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entity::product::{Product, ProductDraft};

/// Body of `POST /products` and `PUT /products/{id}`
///
/// `price` accepts a JSON number or a decimal string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub image: String,
}

impl ProductRequest {
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            stock: self.stock,
            image: self.image.clone(),
        }
    }
}

impl Validate for ProductRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        self.to_draft().check()
    }
}

/// Product projection; `price` is a decimal string such as `"10.00"`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub image: String,
    pub seller_id: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.product_id.to_string(),
            name: product.name,
            slug: product.slug.as_str().to_string(),
            description: product.description,
            price: product.price,
            stock: product.stock,
            image: product.image,
            seller_id: product.seller_id.to_string(),
        }
    }
}
