//! HTTP API: the presentation layer over the selection engine.
//!
//! Owns the single mutable session, renders the engine's derived state, and
//! forwards user intents (select product, toggle add-on, clear, quote).

pub mod app;
