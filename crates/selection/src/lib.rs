//! `camocpq-selection` — the selection & compatibility engine.
//!
//! Pure, synchronous state transitions over an injected immutable catalog:
//! one optional product selection, a set of add-on selections, and the
//! derived compatible/disabled/total views.

pub mod engine;

pub use engine::SelectionEngine;
