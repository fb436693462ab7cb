//! # CineEase Testing
//!
//! Ergonomic testing utilities for reducers.

mod reducer_test;

pub use reducer_test::ReducerTest;
