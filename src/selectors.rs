//! Read-side helpers over the products slice.

use std::borrow::Cow;

use crate::app::AppState;
use crate::product::{Product, ProductId, NEW_PRODUCT_ID};
use crate::state::ProductState;

pub fn select_products_feature(state: &AppState) -> &ProductState {
    &state.products
}

pub fn show_product_code(state: &ProductState) -> bool {
    state.show_product_code
}

pub fn current_product_id(state: &ProductState) -> Option<ProductId> {
    state.current_product_id
}

/// The product being shown or edited.
///
/// While a product is being created this is a fresh [`Product::blank`].
/// A selected id that is not in the list yields `None`.
pub fn current_product(state: &ProductState) -> Option<Cow<'_, Product>> {
    match state.current_product_id? {
        NEW_PRODUCT_ID => Some(Cow::Owned(Product::blank())),
        id => state
            .products
            .iter()
            .find(|product| product.id == id)
            .map(Cow::Borrowed),
    }
}

pub fn products(state: &ProductState) -> &[Product] {
    &state.products
}

pub fn error(state: &ProductState) -> &str {
    &state.error
}
