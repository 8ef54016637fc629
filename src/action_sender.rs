use std::ops::Deref;
use std::sync::Arc;

pub trait ActionSender: Send {
    type SendableAction;

    fn send(&self, action: Self::SendableAction);
}

pub struct AnyActionSender<Action: Send + 'static> {
    value: Box<dyn ActionSender<SendableAction = Action> + Sync>,
}

impl<Action: Send + 'static> AnyActionSender<Action> {
    pub fn new(value: Box<dyn ActionSender<SendableAction = Action> + Sync>) -> Self {
        Self { value }
    }
}

impl<Action: Send + 'static> ActionSender for AnyActionSender<Action> {
    type SendableAction = Action;

    fn send(&self, action: Action) {
        self.value.send(action)
    }
}

impl<T> ActionSender for Arc<T>
where
    T: ActionSender + Sync,
{
    type SendableAction = T::SendableAction;

    fn send(&self, action: Self::SendableAction) {
        self.deref().send(action);
    }
}

/// Sends child actions to a parent after lifting them with `lift`.
pub struct MappedSender<Child, Parent, F>
where
    Child: Send,
    Parent: Send,
    F: Fn(Child) -> Parent + Send + Sync + 'static,
{
    parent: Box<dyn ActionSender<SendableAction = Parent> + Sync>,
    lift: F,
    _child: std::marker::PhantomData<fn(Child)>,
}

impl<Child, Parent, F> MappedSender<Child, Parent, F>
where
    Child: Send,
    Parent: Send,
    F: Fn(Child) -> Parent + Send + Sync + 'static,
{
    pub fn new(parent: Box<dyn ActionSender<SendableAction = Parent> + Sync>, lift: F) -> Self {
        Self {
            parent,
            lift,
            _child: std::marker::PhantomData,
        }
    }
}

impl<Child, Parent, F> ActionSender for MappedSender<Child, Parent, F>
where
    Child: Send + 'static,
    Parent: Send + 'static,
    F: Fn(Child) -> Parent + Send + Sync + 'static,
{
    type SendableAction = Child;

    fn send(&self, action: Child) {
        self.parent.send((self.lift)(action));
    }
}


#[cfg(test)]
mod test {
    use super::test_support::Recorder;
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Parent {
        Toggled(bool),
    }

    #[test]
    fn test_mapped_sender_lifts_into_parent() {
        let recorder = Arc::new(Recorder::<Parent>::default());
        let mapped = MappedSender::new(Box::new(recorder.clone()), Parent::Toggled);
        let sender = AnyActionSender::new(Box::new(mapped));

        sender.send(true);
        sender.send(false);

        assert_eq!(
            recorder.take(),
            vec![Parent::Toggled(true), Parent::Toggled(false)]
        );
    }
}
