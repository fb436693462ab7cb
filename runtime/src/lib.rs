//! # CineEase Runtime
//!
//! The [`Store`] owns a reducer, its state, and its environment. Actions go
//! in through [`Store::send`]; effects returned by the reducer are executed
//! and any actions they produce are fed back in, in order.
//!
//! `send` drains the whole feedback loop before returning. A caller that
//! reads state immediately after a `send` therefore observes the settled
//! outcome — a booking is never reported confirmed while its ledger append
//! is still in flight.

use cineease_core::effect::Effect;
use cineease_core::reducer::Reducer;
use std::collections::VecDeque;
use tokio::sync::RwLock;

/// Runtime driving a single reducer.
///
/// State sits behind an async `RwLock`: concurrent `send` calls serialize at
/// the reducer, reads go through [`Store::state`].
pub struct Store<R: Reducer> {
    state: RwLock<R::State>,
    reducer: R,
    environment: R::Environment,
}

impl<R: Reducer> Store<R> {
    /// Creates a store with the given initial state.
    #[must_use]
    pub fn new(initial_state: R::State, reducer: R, environment: R::Environment) -> Self {
        Self {
            state: RwLock::new(initial_state),
            reducer,
            environment,
        }
    }

    /// Processes `action` plus every action produced by its effects.
    ///
    /// The write lock is held only while the reducer runs, never across an
    /// effect await.
    pub async fn send(&self, action: R::Action) {
        let mut queue = VecDeque::new();
        queue.push_back(action);

        while let Some(action) = queue.pop_front() {
            let effects = {
                let mut state = self.state.write().await;
                self.reducer.reduce(&mut state, action, &self.environment)
            };

            for effect in effects {
                match effect {
                    Effect::None => {}
                    Effect::Future(future) => {
                        if let Some(next) = future.await {
                            tracing::trace!("effect produced a feedback action");
                            queue.push_back(next);
                        }
                    }
                }
            }
        }
    }

    /// Reads the current state through `f`.
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&R::State) -> T,
    {
        f(&*self.state.read().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cineease_core::{SmallVec, smallvec};

    #[derive(Clone, Debug, Default)]
    struct CounterState {
        count: i64,
    }

    #[derive(Clone, Debug)]
    enum CounterAction {
        Increment,
        /// Increments, then feeds one more `Increment` back through an effect.
        IncrementTwice,
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = CounterState;
        type Action = CounterAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            (): &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                CounterAction::Increment => {
                    state.count += 1;
                    SmallVec::new()
                }
                CounterAction::IncrementTwice => {
                    state.count += 1;
                    smallvec![Effect::future(async { Some(CounterAction::Increment) })]
                }
            }
        }
    }

    #[tokio::test]
    async fn send_applies_the_action() {
        let store = Store::new(CounterState::default(), CounterReducer, ());
        store.send(CounterAction::Increment).await;
        assert_eq!(store.state(|s| s.count).await, 1);
    }

    #[tokio::test]
    async fn feedback_actions_settle_before_send_returns() {
        let store = Store::new(CounterState::default(), CounterReducer, ());
        store.send(CounterAction::IncrementTwice).await;
        assert_eq!(store.state(|s| s.count).await, 2);
    }
}
