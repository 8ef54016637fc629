use serde::{Deserialize, Serialize};

pub type ProductId = u32;

/// Id used by `current_product_id` while a new product is being created.
pub const NEW_PRODUCT_ID: ProductId = 0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub product_name: String,
    pub product_code: String,
    pub description: String,
    pub star_rating: f64,
}

impl Product {
    pub fn new(
        id: ProductId,
        product_name: impl Into<String>,
        product_code: impl Into<String>,
    ) -> Self {
        Self {
            id,
            product_name: product_name.into(),
            product_code: product_code.into(),
            description: String::new(),
            star_rating: 0.0,
        }
    }

    /// Template handed to a form when the user starts creating a product.
    pub fn blank() -> Self {
        Self::new(NEW_PRODUCT_ID, "", "New")
    }

    pub fn is_new(&self) -> bool {
        self.id == NEW_PRODUCT_ID
    }
}
