//! Product catalog state for a store-driven UI.
//!
//! [`product_reducer::reduce`] is the transition table: a pure function from
//! the current [`ProductState`] and a [`ProductAction`] to the next snapshot.
//! [`Store`] hosts it behind a dispatch loop, and [`ProductsFeature`] turns
//! request actions into [`ProductRepository`] calls whose outcomes come back
//! as success or failure actions.

mod action;
mod action_sender;
mod app;
mod effect;
mod engine;
mod product;
pub mod product_reducer;
mod reducer;
mod repository;
pub mod selectors;
mod state;
mod state_provider;
mod store;

pub use action::ProductAction;
pub use action_sender::{ActionSender, AnyActionSender};
pub use app::{AppAction, AppReducer, AppState, PRODUCTS_FEATURE_KEY};
pub use effect::{Effect, EffectValue};
pub use product::{Product, ProductId, NEW_PRODUCT_ID};
pub use product_reducer::ProductsFeature;
pub use reducer::Reducer;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use state::ProductState;
pub use state_provider::{BorrowedState, StateProvider};
pub use store::{ChangeObserver, Store};
