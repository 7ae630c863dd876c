//! Domain model for groups, participants and communities.
//!
//! # Responsibility
//! - Define canonical data structures owned by the store.
//! - Define typed patch/input shapes so callers cannot touch derived fields.
//!
//! # Invariants
//! - Every entity is identified by a store-allocated id that is never reused.
//! - Group participant count is derived from the participant list.
//! - Community group references are ordered and duplicate-free.

pub mod community;
pub mod group;
