//! Core domain logic for the groupdesk admin tool.
//! This crate is the single source of truth for group/community invariants.

pub mod clock;
pub mod config;
pub mod fixtures;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{GroupDeletePolicy, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::community::{Community, CommunityId, CommunityPatch, NewCommunity};
pub use model::group::{
    Group, GroupId, GroupPatch, NewGroup, NewParticipant, Participant, ParticipantId, Privacy,
    Role,
};
pub use service::desk::{DeskError, DeskResult, GroupDesk};
pub use service::queries::{CommunityOverview, DashboardStats, GroupFilter, PrivacyFilter};
pub use store::{
    GroupStore, StoreError, StoreEvent, StoreObserver, StoreResult, StoreSnapshot, SubscriptionId,
};
pub use validation::{Field, FieldError, FieldErrorKind, ValidationErrors};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
