//! Algorithm contracts shared by all backends
//!
//! Backends implement the traits defined here; the contracts pin down
//! argument validation, workspace planning, and per-instance status semantics
//! so every backend produces the same observable behavior.

pub mod lapack;

pub use lapack::*;
