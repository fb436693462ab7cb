//! # CineEase Core
//!
//! Core traits and types for the CineEase booking engine.
//!
//! Business logic lives in reducers: functions of the shape
//! `(State, Action, Environment) -> Effects`. Reducers validate a command,
//! update state in place, and describe side effects as values; the runtime
//! executes those effects and feeds any resulting actions back in.
//!
//! - **State**: domain state for a feature
//! - **Action**: commands from callers plus events fed back by effects
//! - **Effect**: side effect descriptions (never execution)
//! - **Environment**: injected dependencies behind traits

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

/// The core trait for business logic.
pub mod reducer {
    use crate::effect::Effect;
    use smallvec::SmallVec;

    /// A reducer processes one action at a time against its state.
    ///
    /// Reducers are deterministic given their inputs: anything that touches
    /// the outside world (clocks excepted) is returned as an [`Effect`]
    /// rather than performed inline.
    pub trait Reducer {
        /// The domain state this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects.
        ///
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions for the runtime to execute
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Side effect descriptions returned by reducers.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Describes a side effect to be executed by the store runtime.
    ///
    /// Effects are values, not execution. A [`Effect::Future`] that resolves
    /// to `Some(action)` feeds that action back into the reducer.
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation with an optional feedback action
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    impl<Action> Effect<Action> {
        /// Wraps an async computation as an effect.
        pub fn future<F>(future: F) -> Self
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Self::Future(Box::pin(future))
        }
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::None => write!(f, "Effect::None"),
                Self::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }
}

/// Dependency injection traits and their stock implementations.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Deterministic clock for tests.
    #[derive(Clone, Copy, Debug)]
    pub struct FixedClock {
        /// The instant this clock always reports
        pub time: DateTime<Utc>,
    }

    impl Clock for FixedClock {
        /// Returns the configured instant, never the wall clock.
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }
}
