//! core
//!
//! Data-model store, reference walking and configuration.
//!
//! # Modules
//!
//! - [`store`] - Ordered index over a dotted-path dump with tolerant lookups
//! - [`walker`] - `LowerLayers` traversal that rebuilds interface stacks
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - The store is built once and never mutated
//! - Walks and lookups are pure functions of the store
//! - Missing data is an empty result, never an error

pub mod config;
pub mod store;
pub mod walker;
