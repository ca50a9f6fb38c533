//! Shared test utilities for ldifdoc integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Every helper is deterministic: normalisers are built
//! on a [`FixedClock`](ldifdoc_core::FixedClock).

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
