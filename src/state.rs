use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::product::{Product, ProductId};

/// Snapshot of the products feature.
///
/// `products` is shared between snapshots: cloning a state never copies the
/// list, and a transition that does not touch it hands the same `Arc` to the
/// next snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductState {
    pub show_product_code: bool,
    /// `None` when nothing is selected, `Some(NEW_PRODUCT_ID)` while creating.
    pub current_product_id: Option<ProductId>,
    pub products: Arc<[Product]>,
    /// Empty when there is no error.
    pub error: String,
}

impl ProductState {
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

/// A shared `products` list is equal to itself without looking at its
/// entries, so a pass-through transition never reads as a change.
impl PartialEq for ProductState {
    fn eq(&self, other: &Self) -> bool {
        self.show_product_code == other.show_product_code
            && self.current_product_id == other.current_product_id
            && self.error == other.error
            && (Arc::ptr_eq(&self.products, &other.products) || self.products == other.products)
    }
}

impl Default for ProductState {
    fn default() -> Self {
        Self {
            show_product_code: true,
            current_product_id: None,
            products: Arc::from(Vec::new()),
            error: String::new(),
        }
    }
}
