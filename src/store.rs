use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::AbortHandle;

use crate::action_sender::{ActionSender, AnyActionSender, MappedSender};
use crate::engine::StoreEngine;
use crate::reducer::Reducer;
use crate::state_provider::{AnyStateProvider, BorrowedState, ScopedState, StateProvider};

pub trait ChangeObserver {
    /// Ticks once for every dispatch that changed the root state. A receiver
    /// that falls behind sees `RecvError::Lagged` and keeps going.
    fn observe(&self) -> broadcast::Receiver<()>;
}

pub struct Store<State, Action: Send + 'static> {
    inner: StoreInner<State, Action>,
}

enum StoreInner<State, Action: Send + 'static> {
    Root {
        engine: Arc<StoreEngine<State, Action>>,
        handle: AbortHandle,
    },
    Scoped {
        sender: Arc<AnyActionSender<Action>>,
        state: Arc<AnyStateProvider<State>>,
        changes: broadcast::Sender<()>,
    },
}

impl<State, Action> Store<State, Action>
where
    State: Clone + PartialEq + Send + Sync + 'static,
    Action: std::fmt::Debug + Send + 'static,
{
    /// Builds a root store and starts its dispatch loop on the current tokio
    /// runtime.
    pub fn new<R: Reducer<State, Action> + Send + Sync + 'static>(state: State, reducer: R) -> Self {
        let (engine, handle) = StoreEngine::start(state, reducer);
        Self {
            inner: StoreInner::Root {
                engine: Arc::new(engine),
                handle,
            },
        }
    }
}

impl<State, Action> Store<State, Action>
where
    State: Send + Sync + 'static,
    Action: Send + 'static,
{
    /// Do not hold the guard across an `.await`: the dispatch loop cannot
    /// reduce while it is alive.
    pub fn state(&self) -> BorrowedState<'_, State> {
        match &self.inner {
            StoreInner::Root { engine, .. } => engine.state(),
            StoreInner::Scoped { state, .. } => state.state(),
        }
    }

    /// Narrows the store to a feature: reads go through `state`, and sent
    /// child actions are lifted with `action` before they reach the root.
    pub fn scope<ChildState, ChildAction>(
        &self,
        state: impl Fn(&State) -> &ChildState + Send + Sync + 'static,
        action: impl Fn(ChildAction) -> Action + Send + Sync + 'static,
    ) -> Store<ChildState, ChildAction>
    where
        ChildState: Send + Sync + 'static,
        ChildAction: Send + 'static,
    {
        let sender = MappedSender::new(self.parent_sender(), action);
        let state = ScopedState::new(self.parent_state(), state);
        Store {
            inner: StoreInner::Scoped {
                sender: Arc::new(AnyActionSender::new(Box::new(sender))),
                state: Arc::new(AnyStateProvider::new(Box::new(state))),
                changes: self.changes(),
            },
        }
    }

    fn parent_sender(&self) -> Box<dyn ActionSender<SendableAction = Action> + Sync> {
        match &self.inner {
            StoreInner::Root { engine, .. } => Box::new(engine.clone()),
            StoreInner::Scoped { sender, .. } => Box::new(sender.clone()),
        }
    }

    fn parent_state(&self) -> Box<dyn StateProvider<State = State> + Sync> {
        match &self.inner {
            StoreInner::Root { engine, .. } => Box::new(engine.clone()),
            StoreInner::Scoped { state, .. } => Box::new(state.clone()),
        }
    }

    fn changes(&self) -> broadcast::Sender<()> {
        match &self.inner {
            StoreInner::Root { engine, .. } => engine.changes().clone(),
            StoreInner::Scoped { changes, .. } => changes.clone(),
        }
    }
}

impl<State, Action> ChangeObserver for Store<State, Action>
where
    Action: Send + 'static,
{
    fn observe(&self) -> broadcast::Receiver<()> {
        match &self.inner {
            StoreInner::Root { engine, .. } => engine.changes().subscribe(),
            StoreInner::Scoped { changes, .. } => changes.subscribe(),
        }
    }
}

impl<State, Action> ActionSender for Store<State, Action>
where
    State: Send + Sync,
    Action: Send + 'static,
{
    type SendableAction = Action;

    fn send(&self, action: Action) {
        match &self.inner {
            StoreInner::Root { engine, .. } => engine.send(action),
            StoreInner::Scoped { sender, .. } => sender.send(action),
        }
    }
}

impl<State, Action: Send + 'static> Drop for Store<State, Action> {
    fn drop(&mut self) {
        if let StoreInner::Root { handle, .. } = &self.inner {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;
    use crate::action::ProductAction;
    use crate::app::{AppAction, AppReducer, AppState};
    use crate::product::Product;
    use crate::repository::InMemoryProductRepository;
    use crate::selectors;
    use crate::state::ProductState;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Leaf Rake", "GDN-0011"),
            Product::new(2, "Garden Cart", "GDN-0023"),
            Product::new(5, "Hammer", "TBX-0048"),
        ]
    }

    fn store() -> Store<AppState, AppAction> {
        let repository = InMemoryProductRepository::new(catalog());
        Store::new(AppState::default(), AppReducer::new(Arc::new(repository)))
    }

    async fn wait_until<S, A>(store: &Store<S, A>, done: impl Fn(&S) -> bool)
    where
        S: Send + Sync + 'static,
        A: Send + 'static,
    {
        let mut changes = store.observe();
        tokio::time::timeout(Duration::from_secs(1), async {
            while !done(&*store.state()) {
                let _ = changes.recv().await;
            }
        })
        .await
        .expect("store never reached the expected state");
    }

    #[tokio::test]
    async fn test_simple_action() {
        let store = store();

        store.send(AppAction::Products(ProductAction::ToggleProductCode));

        wait_until(&store, |state| !state.products.show_product_code).await;
    }

    #[tokio::test]
    async fn test_load_request_fills_products() {
        let store = store();

        store.send(AppAction::Init);
        store.send(AppAction::Products(ProductAction::LoadProducts));

        wait_until(&store, |state| state.products.products.len() == 3).await;
        assert_eq!(&*store.state().products.products, catalog().as_slice());
    }

    #[tokio::test]
    async fn test_scoped_store_reads_and_sends() {
        let store = store();
        let products: Store<ProductState, ProductAction> =
            store.scope(selectors::select_products_feature, AppAction::Products);

        products.send(ProductAction::LoadProducts);
        wait_until(&products, |state| state.products.len() == 3).await;

        products.send(ProductAction::SetCurrentProduct {
            current_product_id: 5,
        });
        wait_until(&products, |state| state.current_product_id == Some(5)).await;

        let current = selectors::current_product(&products.state()).map(|p| p.into_owned());
        assert_eq!(current.map(|p| p.product_name), Some("Hammer".to_owned()));
        assert_eq!(store.state().products.current_product_id, Some(5));
    }

    #[tokio::test]
    async fn test_delete_then_failed_update() {
        let store = store();
        let products = store.scope(selectors::select_products_feature, AppAction::Products);

        products.send(ProductAction::LoadProducts);
        wait_until(&products, |state| state.products.len() == 3).await;

        products.send(ProductAction::DeleteProduct { product_id: 2 });
        wait_until(&products, |state| state.products.len() == 2).await;

        products.send(ProductAction::UpdateProduct {
            product: Product::new(2, "Garden Cart", "GDN-0023"),
        });
        wait_until(&products, |state| state.has_error()).await;

        let state = products.state();
        assert_eq!(state.error, "product 2 not found");
        let ids: Vec<u32> = state.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 5]);
    }

    #[tokio::test]
    async fn test_unrated_product_does_not_tick_on_no_op() {
        let mut unrated = Product::new(3, "Saw", "TBX-0022");
        unrated.star_rating = f64::NAN;
        let state = AppState {
            products: ProductState {
                products: Arc::from(vec![unrated]),
                ..Default::default()
            },
        };
        let repository = InMemoryProductRepository::default();
        let store = Store::new(state, AppReducer::new(Arc::new(repository)));
        let mut changes = store.observe();

        store.send(AppAction::Products(ProductAction::ClearCurrentProduct));
        store.send(AppAction::Products(ProductAction::ToggleProductCode));

        tokio::time::timeout(Duration::from_secs(1), changes.recv())
            .await
            .expect("no change ticked")
            .expect("change channel closed");
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(changes.try_recv().is_err());
        assert!(!store.state().products.show_product_code);
    }

    #[tokio::test]
    async fn test_send_after_drop_is_dropped() {
        let store = store();
        let products = store.scope(selectors::select_products_feature, AppAction::Products);
        drop(store);
        tokio::time::sleep(Duration::from_millis(20)).await;

        products.send(ProductAction::ToggleProductCode);
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(products.state().show_product_code);
    }
}
