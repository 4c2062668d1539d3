//! Core types and trait definitions for the todo service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store and API crates both depend on it.

pub mod store;
pub mod todo;

pub use store::TodoStore;
pub use todo::{Todo, TodoFields, TodoPatch};
