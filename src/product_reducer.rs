use std::sync::Arc;

use crate::action::ProductAction;
use crate::action_sender::ActionSender;
use crate::effect::Effect;
use crate::product::{Product, NEW_PRODUCT_ID};
use crate::reducer::Reducer;
use crate::repository::ProductRepository;
use crate::state::ProductState;

/// Produces the snapshot that follows `state` once `action` has happened.
///
/// `state` is left as it was. Fields the action does not touch are carried
/// over, and `products` keeps pointing at the same list unless the action
/// rewrites it. Request actions fall through unchanged.
pub fn reduce(state: &ProductState, action: ProductAction) -> ProductState {
    match action {
        ProductAction::ToggleProductCode => ProductState {
            show_product_code: !state.show_product_code,
            ..state.clone()
        },
        ProductAction::SetCurrentProduct { current_product_id } => ProductState {
            current_product_id: Some(current_product_id),
            ..state.clone()
        },
        ProductAction::ClearCurrentProduct => ProductState {
            current_product_id: None,
            ..state.clone()
        },
        ProductAction::InitializeCurrentProduct => ProductState {
            current_product_id: Some(NEW_PRODUCT_ID),
            ..state.clone()
        },
        ProductAction::LoadProductsSuccess { products } => ProductState {
            products: Arc::from(products),
            error: String::new(),
            ..state.clone()
        },
        ProductAction::LoadProductsFailure { error } => ProductState {
            products: Arc::from(Vec::new()),
            error,
            ..state.clone()
        },
        ProductAction::UpdateProductSuccess { product } => {
            if !state.products.iter().any(|item| item.id == product.id) {
                log::debug!("Updated product {} is not in the loaded list", product.id);
            }
            let current_product_id = Some(product.id);
            let products: Vec<Product> = state
                .products
                .iter()
                .map(|item| {
                    if item.id == product.id {
                        product.clone()
                    } else {
                        item.clone()
                    }
                })
                .collect();
            ProductState {
                products: Arc::from(products),
                current_product_id,
                error: String::new(),
                ..state.clone()
            }
        }
        ProductAction::CreateProductSuccess { product } => {
            let products: Vec<Product> = state
                .products
                .iter()
                .cloned()
                .chain(std::iter::once(product))
                .collect();
            ProductState {
                products: Arc::from(products),
                error: String::new(),
                ..state.clone()
            }
        }
        ProductAction::DeleteProductSuccess { product_id } => {
            let products: Vec<Product> = state
                .products
                .iter()
                .filter(|item| item.id != product_id)
                .cloned()
                .collect();
            ProductState {
                products: Arc::from(products),
                error: String::new(),
                ..state.clone()
            }
        }
        ProductAction::UpdateProductFailure { error }
        | ProductAction::CreateProductFailure { error }
        | ProductAction::DeleteProductFailure { error } => ProductState {
            error,
            ..state.clone()
        },
        ProductAction::LoadProducts
        | ProductAction::UpdateProduct { .. }
        | ProductAction::CreateProduct { .. }
        | ProductAction::DeleteProduct { .. } => state.clone(),
    }
}

/// The products feature: the transition table plus the repository calls
/// behind the request actions.
pub struct ProductsFeature {
    repository: Arc<dyn ProductRepository>,
}

impl ProductsFeature {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    fn request(&self, action: &ProductAction) -> Effect<ProductAction> {
        let repository = self.repository.clone();
        match action {
            ProductAction::LoadProducts => Effect::run(move |sender| async move {
                sender.send(match repository.load().await {
                    Ok(products) => ProductAction::LoadProductsSuccess { products },
                    Err(err) => ProductAction::LoadProductsFailure {
                        error: err.to_string(),
                    },
                });
            }),
            ProductAction::UpdateProduct { product } => {
                let product = product.clone();
                Effect::run(move |sender| async move {
                    sender.send(match repository.update(product).await {
                        Ok(product) => ProductAction::UpdateProductSuccess { product },
                        Err(err) => ProductAction::UpdateProductFailure {
                            error: err.to_string(),
                        },
                    });
                })
            }
            ProductAction::CreateProduct { product } => {
                let product = product.clone();
                Effect::run(move |sender| async move {
                    sender.send(match repository.create(product).await {
                        Ok(product) => ProductAction::CreateProductSuccess { product },
                        Err(err) => ProductAction::CreateProductFailure {
                            error: err.to_string(),
                        },
                    });
                })
            }
            &ProductAction::DeleteProduct { product_id } => Effect::run(move |sender| async move {
                sender.send(match repository.delete(product_id).await {
                    Ok(()) => ProductAction::DeleteProductSuccess { product_id },
                    Err(err) => ProductAction::DeleteProductFailure {
                        error: err.to_string(),
                    },
                });
            }),
            _ => Effect::none(),
        }
    }
}

impl Reducer<ProductState, ProductAction> for ProductsFeature {
    fn reduce(&self, state: &mut ProductState, action: ProductAction) -> Effect<ProductAction> {
        log::trace!("Reducing {:?}", action);
        let effect = self.request(&action);
        *state = reduce(state, action);
        effect
    }
}
