use crate::product::{Product, ProductId};

/// Everything that can be dispatched to the products feature.
///
/// The request variants (`LoadProducts`, `UpdateProduct`, `CreateProduct`,
/// `DeleteProduct`) do not change the state by themselves. The feature turns
/// them into repository calls that answer with the matching success or
/// failure action.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    ToggleProductCode,
    SetCurrentProduct { current_product_id: ProductId },
    ClearCurrentProduct,
    InitializeCurrentProduct,

    LoadProducts,
    LoadProductsSuccess { products: Vec<Product> },
    LoadProductsFailure { error: String },

    UpdateProduct { product: Product },
    UpdateProductSuccess { product: Product },
    UpdateProductFailure { error: String },

    CreateProduct { product: Product },
    CreateProductSuccess { product: Product },
    CreateProductFailure { error: String },

    DeleteProduct { product_id: ProductId },
    DeleteProductSuccess { product_id: ProductId },
    DeleteProductFailure { error: String },
}
