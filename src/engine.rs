use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::{broadcast, mpsc};
use tokio::task::{AbortHandle, JoinSet};

use crate::action_sender::{ActionSender, AnyActionSender};
use crate::effect::{Effect, EffectValue};
use crate::reducer::Reducer;
use crate::state_provider::{BorrowedState, StateProvider};

enum StoreEvent<Action: Send + 'static> {
    Action(Action),
    Effect(Effect<Action>),
}

type EventReceiver<Action> = mpsc::UnboundedReceiver<StoreEvent<Action>>;
type SharedReducer<State, Action> = Arc<dyn Reducer<State, Action> + Send + Sync + 'static>;

/// Number of unread change ticks kept per observer before it starts lagging.
const CHANGE_CAPACITY: usize = 16;

pub(crate) struct EventQueue<Action: Send + 'static> {
    sender: mpsc::UnboundedSender<StoreEvent<Action>>,
}

impl<Action: Send + 'static> EventQueue<Action> {
    fn push(&self, event: StoreEvent<Action>) {
        if self.sender.send(event).is_err() {
            log::warn!("Store loop has stopped, dropping event");
        }
    }
}

impl<Action: Send + 'static> ActionSender for EventQueue<Action> {
    type SendableAction = Action;

    fn send(&self, action: Action) {
        self.push(StoreEvent::Action(action));
    }
}

/// Owns the root state and feeds the dispatch loop.
pub struct StoreEngine<State, Action: Send + 'static> {
    state: Arc<RwLock<State>>,
    queue: Arc<EventQueue<Action>>,
    changes: broadcast::Sender<()>,
}

impl<State, Action> StoreEngine<State, Action>
where
    State: Clone + PartialEq + Send + Sync + 'static,
    Action: std::fmt::Debug + Send + 'static,
{
    /// Spawns the dispatch loop on the current tokio runtime.
    pub fn start(
        state: State,
        reducer: impl Reducer<State, Action> + Send + Sync + 'static,
    ) -> (Self, AbortHandle) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        let engine = Self {
            state: Arc::new(RwLock::new(state)),
            queue: Arc::new(EventQueue { sender }),
            changes,
        };

        let handle = tokio::spawn(run_loop(
            engine.state.clone(),
            Arc::new(reducer),
            engine.queue.clone(),
            engine.changes.clone(),
            receiver,
        ));

        (engine, handle.abort_handle())
    }
}

impl<State, Action: Send + 'static> StoreEngine<State, Action> {
    pub fn changes(&self) -> &broadcast::Sender<()> {
        &self.changes
    }
}

async fn run_loop<State, Action>(
    state: Arc<RwLock<State>>,
    reducer: SharedReducer<State, Action>,
    queue: Arc<EventQueue<Action>>,
    changes: broadcast::Sender<()>,
    mut events: EventReceiver<Action>,
) where
    State: Clone + PartialEq + Send + Sync + 'static,
    Action: std::fmt::Debug + Send + 'static,
{
    let mut jobs: JoinSet<()> = JoinSet::new();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                match event {
                    StoreEvent::Action(action) => {
                        let effect = process(&state, reducer.as_ref(), action, &changes);
                        queue.push(StoreEvent::Effect(effect));
                    }
                    StoreEvent::Effect(effect) => {
                        log::debug!("Handling {:#?}", effect.value);
                        match effect.value {
                            EffectValue::None => {}
                            EffectValue::Send(action) => queue.push(StoreEvent::Action(action)),
                            EffectValue::Async(job) => {
                                let sender = AnyActionSender::new(Box::new(queue.clone()));
                                jobs.spawn(job(sender));
                            }
                        }
                    }
                }
            }
            Some(joined) = jobs.join_next(), if !jobs.is_empty() => {
                if let Err(err) = joined {
                    log::warn!("Effect job failed: {}", err);
                }
            }
        }
    }
}

fn process<State, Action>(
    state: &RwLock<State>,
    reducer: &(dyn Reducer<State, Action> + Send + Sync),
    action: Action,
    changes: &broadcast::Sender<()>,
) -> Effect<Action>
where
    State: Clone + PartialEq,
    Action: Send + 'static,
{
    let (effect, changed) = {
        let mut state = state.write();
        let before = state.clone();
        let effect = reducer.reduce(&mut *state, action);
        (effect, before != *state)
    };
    if changed {
        // Nobody observing is not an error.
        let _ = changes.send(());
    }
    effect
}

impl<State, Action> StateProvider for StoreEngine<State, Action>
where
    State: Send + Sync,
    Action: Send + 'static,
{
    type State = State;

    fn state(&self) -> BorrowedState<'_, State> {
        self.state.as_ref().state()
    }
}

impl<State, Action> ActionSender for StoreEngine<State, Action>
where
    State: Send + Sync,
    Action: Send + 'static,
{
    type SendableAction = Action;

    fn send(&self, action: Action) {
        self.queue.send(action);
    }
}
