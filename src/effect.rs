use std::fmt::Debug;
use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::action_sender::{AnyActionSender, MappedSender};

/// Follow-up work a reducer hands back to the store.
pub struct Effect<Action: Send + 'static> {
    pub value: EffectValue<Action>,
}

pub type EffectJob<Action> = Box<dyn FnOnce(AnyActionSender<Action>) -> BoxFuture<'static, ()> + Send>;

pub enum EffectValue<Action: Send + 'static> {
    None,
    Send(Action),
    Async(EffectJob<Action>),
}

impl<Action> Effect<Action>
where
    Action: Send + 'static,
{
    pub fn none() -> Self {
        Self {
            value: EffectValue::None,
        }
    }

    pub fn send(action: Action) -> Self {
        Self {
            value: EffectValue::Send(action),
        }
    }

    /// Runs `job` on the store's task set. Actions sent through the given
    /// sender are dispatched back into the store.
    pub fn run<T, Fut>(job: T) -> Self
    where
        Fut: Future<Output = ()> + Send + 'static,
        T: FnOnce(AnyActionSender<Action>) -> Fut + Send + 'static,
    {
        let job: EffectJob<Action> = Box::new(move |sender| job(sender).boxed());
        Self {
            value: EffectValue::Async(job),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self.value, EffectValue::None)
    }

    /// Lifts a feature effect into the action type of an enclosing reducer.
    pub fn map<F, MappedAction>(self, map: F) -> Effect<MappedAction>
    where
        MappedAction: Send + 'static,
        F: Fn(Action) -> MappedAction + Send + Sync + 'static,
    {
        match self.value {
            EffectValue::None => Effect::none(),
            EffectValue::Send(action) => Effect::send(map(action)),
            EffectValue::Async(job) => Effect::run(move |sender: AnyActionSender<MappedAction>| {
                let mapped = MappedSender::new(Box::new(sender), map);
                job(AnyActionSender::new(Box::new(mapped)))
            }),
        }
    }
}

impl<Action> Debug for EffectValue<Action>
where
    Action: Debug + Send + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Send(action) => write!(f, "Send {:#?}", action),
            Self::Async(_) => f.write_str("Async"),
        }
    }
}
