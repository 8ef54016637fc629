use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::{RawRwLock, RwLock, RwLockReadGuard};

/// Read guard on a store's state, or on a slice of it.
pub type BorrowedState<'a, State> = lock_api::MappedRwLockReadGuard<'a, RawRwLock, State>;

pub trait StateProvider: Send {
    type State;

    fn state(&self) -> BorrowedState<'_, Self::State>;
}

pub struct AnyStateProvider<State> {
    value: Box<dyn StateProvider<State = State> + Sync>,
}

impl<State: Send> AnyStateProvider<State> {
    pub fn new(value: Box<dyn StateProvider<State = State> + Sync>) -> Self {
        Self { value }
    }
}

impl<State: Send> StateProvider for AnyStateProvider<State> {
    type State = State;

    fn state(&self) -> BorrowedState<'_, Self::State> {
        self.value.state()
    }
}

impl<T> StateProvider for Arc<T>
where
    T: StateProvider + Sync,
{
    type State = T::State;

    fn state(&self) -> BorrowedState<'_, Self::State> {
        self.deref().state()
    }
}

impl<State: Send + Sync> StateProvider for RwLock<State> {
    type State = State;

    fn state(&self) -> BorrowedState<'_, State> {
        RwLockReadGuard::map(self.read(), |state| state)
    }
}

/// Narrows a parent provider to the slice returned by `select`.
pub struct ScopedState<Parent, Child, F>
where
    F: Fn(&Parent) -> &Child + Send + Sync + 'static,
{
    parent: Box<dyn StateProvider<State = Parent> + Sync>,
    select: F,
    _child: PhantomData<fn() -> Child>,
}

impl<Parent, Child, F> ScopedState<Parent, Child, F>
where
    F: Fn(&Parent) -> &Child + Send + Sync + 'static,
{
    pub fn new(parent: Box<dyn StateProvider<State = Parent> + Sync>, select: F) -> Self {
        Self {
            parent,
            select,
            _child: PhantomData,
        }
    }
}

impl<Parent, Child, F> StateProvider for ScopedState<Parent, Child, F>
where
    Parent: 'static,
    Child: 'static,
    F: Fn(&Parent) -> &Child + Send + Sync + 'static,
{
    type State = Child;

    fn state(&self) -> BorrowedState<'_, Child> {
        lock_api::MappedRwLockReadGuard::map(self.parent.state(), &self.select)
    }
}
