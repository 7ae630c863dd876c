//! Store configuration.
//!
//! # Responsibility
//! - Carry the choices a store owner makes at construction time.
//!
//! # Invariants
//! - `StoreConfig::default()` seeds fixtures and cascades group deletion.

/// What happens to community references when a group is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupDeletePolicy {
    /// Remove the deleted group id from every community that references it.
    #[default]
    Cascade,
    /// Leave references in place; reads filter out ids with no group.
    KeepReferences,
}

impl GroupDeletePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cascade => "cascade",
            Self::KeepReferences => "keep_references",
        }
    }
}

/// Construction-time options for `GroupStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    pub delete_policy: GroupDeletePolicy,
    /// Load the built-in fixture set on construction.
    pub seed_fixtures: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            delete_policy: GroupDeletePolicy::Cascade,
            seed_fixtures: true,
        }
    }
}

impl StoreConfig {
    /// Empty store with the default delete policy.
    pub fn empty() -> Self {
        Self {
            seed_fixtures: false,
            ..Self::default()
        }
    }

    pub fn with_delete_policy(mut self, policy: GroupDeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }
}
