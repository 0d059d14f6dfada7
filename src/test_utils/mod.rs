//! Test utilities for unit and route testing.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - In-memory implementations of every port, plus failing variants
//! - `TestAppStateBuilder` for constructing an `AppState` over those mocks

mod app_state_builder;
mod auth_mocks;
mod factories;
mod preview_mocks;

pub use app_state_builder::*;
pub use auth_mocks::*;
pub use factories::*;
pub use preview_mocks::*;
