//! In-memory state container for groups and communities.
//!
//! # Responsibility
//! - Own all group/community state for one session.
//! - Be the single writer path; every mutation goes through `GroupStore`.
//! - Notify observers after each successful mutation.
//!
//! # Invariants
//! - Operations on absent ids return `StoreError` and leave state untouched.
//! - Ids are allocated from monotonic per-kind counters and never reused.
//! - Community group lists stay duplicate-free.

pub mod error;
pub mod events;
pub mod group_store;
mod ids;

pub use error::{StoreError, StoreResult};
pub use events::{StoreEvent, StoreObserver, SubscriptionId};
pub use group_store::{GroupStore, StoreSnapshot};
