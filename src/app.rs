use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::action::ProductAction;
use crate::effect::Effect;
use crate::product_reducer::ProductsFeature;
use crate::reducer::Reducer;
use crate::repository::ProductRepository;
use crate::state::ProductState;

/// Key the products slice is registered under in the root state.
pub const PRODUCTS_FEATURE_KEY: &str = "products";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub products: ProductState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Dispatched once when the store comes up. No feature handles it.
    Init,
    Products(ProductAction),
}

pub struct AppReducer {
    products: ProductsFeature,
}

impl AppReducer {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self {
            products: ProductsFeature::new(repository),
        }
    }
}

impl Reducer<AppState, AppAction> for AppReducer {
    fn reduce(&self, state: &mut AppState, action: AppAction) -> Effect<AppAction> {
        match action {
            AppAction::Init => Effect::none(),
            AppAction::Products(action) => self
                .products
                .reduce(&mut state.products, action)
                .map(AppAction::Products),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::effect::EffectValue;
    use crate::repository::InMemoryProductRepository;

    fn reducer() -> AppReducer {
        AppReducer::new(Arc::new(InMemoryProductRepository::default()))
    }

    #[test]
    fn test_init_leaves_state_alone() {
        let mut state = AppState::default();
        let before = state.clone();

        let effect = reducer().reduce(&mut state, AppAction::Init);

        assert!(effect.is_none());
        assert_eq!(state, before);
        assert!(Arc::ptr_eq(&state.products.products, &before.products.products));
    }

    #[test]
    fn test_product_actions_reach_the_slice() {
        let mut state = AppState::default();

        reducer().reduce(
            &mut state,
            AppAction::Products(ProductAction::SetCurrentProduct {
                current_product_id: 4,
            }),
        );

        assert_eq!(state.products.current_product_id, Some(4));
    }

    #[test]
    fn test_request_effects_are_lifted() {
        let mut state = AppState::default();

        let effect = reducer().reduce(&mut state, AppAction::Products(ProductAction::LoadProducts));

        assert!(matches!(effect.value, EffectValue::Async(_)));
    }

    #[test]
    fn test_slice_serializes_under_feature_key() {
        let json = serde_json::to_value(AppState::default()).unwrap();

        assert_eq!(json[PRODUCTS_FEATURE_KEY]["showProductCode"], true);
    }
}
