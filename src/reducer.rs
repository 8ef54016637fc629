use crate::Effect;

/// Applies one action to the state in place and returns the follow-up work.
pub trait Reducer<State, Action: Send + 'static> {
    fn reduce(&self, state: &mut State, action: Action) -> Effect<Action>;
}

impl<State, Action, F> Reducer<State, Action> for F
where
    Action: Send + 'static,
    F: Fn(&mut State, Action) -> Effect<Action>,
{
    fn reduce(&self, state: &mut State, action: Action) -> Effect<Action> {
        self(state, action)
    }
}
