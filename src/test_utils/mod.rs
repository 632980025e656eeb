//! Test utilities for use-case and HTTP-level tests.
//!
//! This module provides:
//! - In-memory implementations of the repository and revocation ports
//! - Test data factories for creating valid fixtures
//! - `TestAppStateBuilder` for wiring an `AppState` without Postgres or Redis

mod app_state_builder;
mod factories;
mod mocks;

pub use app_state_builder::*;
pub use factories::*;
pub use mocks::*;
