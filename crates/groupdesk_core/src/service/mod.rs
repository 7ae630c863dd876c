//! Use-case services over the store.
//!
//! # Responsibility
//! - Validate form input, then delegate mutations to `GroupStore`.
//! - Provide read projections used by list, detail and dashboard screens.

pub mod desk;
pub mod queries;
