//! Fluent Given-When-Then harness for reducer tests.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use cineease_core::SmallVec;
use cineease_core::effect::Effect;
use cineease_core::reducer::Reducer;

/// Fluent API for testing reducers with Given-When-Then syntax.
///
/// Queues one or more actions, applies them in order, then hands the final
/// state and the effects of the last action to a single closure:
///
/// ```ignore
/// ReducerTest::new(BookingReducer::new())
///     .with_env(test_environment())
///     .given_state(WorkflowState::new(profile))
///     .when_action(BookingAction::SelectMovie { name: "Shadow Realm".into() })
///     .then(|state, effects| {
///         assert_eq!(state.stage, Stage::SeatSelecting);
///         assert!(effects.is_empty());
///     });
/// ```
pub struct ReducerTest<R: Reducer> {
    reducer: R,
    environment: Option<R::Environment>,
    initial_state: Option<R::State>,
    actions: Vec<R::Action>,
}

impl<R: Reducer> ReducerTest<R> {
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: R::Environment) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: R::State) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Queue an action (When); may be called repeatedly to build a sequence
    #[must_use]
    pub fn when_action(mut self, action: R::Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Queue a sequence of actions (When)
    #[must_use]
    pub fn when_actions<I>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = R::Action>,
    {
        self.actions.extend(actions);
        self
    }

    /// Run the queued actions and assert on the outcome (Then).
    ///
    /// `check` receives the final state and the effects returned for the
    /// last action only; earlier actions are setup.
    ///
    /// # Panics
    ///
    /// Panics if the environment, initial state, or at least one action is
    /// missing, or if `check` itself panics.
    #[allow(clippy::expect_used, clippy::panic)] // test harness
    pub fn then<F>(self, check: F)
    where
        F: FnOnce(&R::State, &[Effect<R::Action>]),
    {
        let Self {
            reducer,
            environment,
            initial_state,
            actions,
        } = self;

        let env = environment.expect("environment must be set with with_env()");
        let mut state = initial_state.expect("initial state must be set with given_state()");
        assert!(
            !actions.is_empty(),
            "at least one action must be queued with when_action()"
        );

        let mut effects: SmallVec<[Effect<R::Action>; 4]> = SmallVec::new();
        for action in actions {
            effects = reducer.reduce(&mut state, action, &env);
        }

        check(&state, &effects);
    }
}
