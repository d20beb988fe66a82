//! Monthly commission calculator for insurance agents.
//!
//! The engine (`engine::compute`) is a pure function from agent status
//! and contract entries to a commission breakdown. Everything stateful
//! (the entry list, slider defaults) lives in `form` and belongs to the
//! front-end.

pub mod clock;
pub mod command;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod engine;
pub mod entry;
pub mod error;
pub mod form;
pub mod rates;
pub mod types;
