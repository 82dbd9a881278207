//! Shared test utilities for rxfind integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. The assertion macros are `#[macro_export]`ed and are
//! available at the crate root of every harness.

#![allow(dead_code)]

pub mod assertions;
pub mod builders;
pub mod fake_rxnav;
pub mod fixtures;

pub use builders::*;
pub use fake_rxnav::{Endpoint, FakeRxNav};
pub use fixtures::*;
