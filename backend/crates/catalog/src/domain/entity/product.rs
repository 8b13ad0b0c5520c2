//! Product Entity

use chrono::{DateTime, Utc};
use kernel::FieldErrors;
use kernel::id::{ProductId, UserId};
use kernel::principal::Principal;
use kernel::validation::char_len_between;
use rust_decimal::Decimal;

use crate::domain::value_object::slug::Slug;

pub const PRODUCT_NAME_MIN_LENGTH: usize = 3;
pub const PRODUCT_NAME_MAX_LENGTH: usize = 100;

/// Money is stored as NUMERIC(10,2)
pub const PRICE_SCALE: u32 = 2;

/// Largest value NUMERIC(10,2) holds
pub fn max_price() -> Decimal {
    Decimal::new(99_999_999_99, PRICE_SCALE)
}

/// Editable product fields, shared by create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub image: String,
}

impl ProductDraft {
    /// Field checks; messages are what clients see
    pub fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = self.name.trim();
        errors.check(name.is_empty(), "name", "Name is required");
        errors.check(
            !char_len_between(name, PRODUCT_NAME_MIN_LENGTH, PRODUCT_NAME_MAX_LENGTH),
            "name",
            "Name must be between 3 and 100 characters",
        );
        errors.check(
            self.price <= Decimal::ZERO,
            "price",
            "Price must be greater than 0",
        );
        errors.check(self.price > max_price(), "price", "Price is too large");
        errors.check(self.stock <= 0, "stock", "Stock must be greater than 0");
        errors.check(self.image.trim().is_empty(), "image", "Image is required");
        errors.into_result()
    }

    /// Trimmed text, price rounded to cents
    pub fn normalized(self) -> Self {
        let mut price = self.price.round_dp(PRICE_SCALE);
        price.rescale(PRICE_SCALE);
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            stock: self.stock,
            image: self.image.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub product_id: ProductId,
    pub seller_id: UserId,
    pub name: String,
    pub slug: Slug,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(seller_id: UserId, draft: ProductDraft, slug: Slug) -> Self {
        let now = Utc::now();
        Self {
            product_id: ProductId::new(),
            seller_id,
            name: draft.name,
            slug,
            description: draft.description,
            price: draft.price,
            stock: draft.stock,
            image: draft.image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field
    pub fn apply(&mut self, draft: ProductDraft, slug: Slug) {
        self.name = draft.name;
        self.slug = slug;
        self.description = draft.description;
        self.price = draft.price;
        self.stock = draft.stock;
        self.image = draft.image;
        self.updated_at = Utc::now();
    }

    /// Owner or admin
    pub fn can_be_managed_by(&self, principal: &Principal) -> bool {
        principal.is_admin() || self.seller_id == principal.user_id
    }
}
