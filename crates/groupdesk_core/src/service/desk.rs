//! Admin use-case service.
//!
//! # Responsibility
//! - Provide the entry points the admin screens call.
//! - Run form validation before any store mutation.
//!
//! # Invariants
//! - Invalid input never reaches the store.
//! - Store lookup failures are surfaced unchanged inside `DeskError::Store`.

use crate::clock::Clock;
use crate::config::StoreConfig;
use crate::model::community::{Community, CommunityId, CommunityPatch, NewCommunity};
use crate::model::group::{
    Group, GroupId, GroupPatch, NewGroup, NewParticipant, Participant, ParticipantId,
};
use crate::service::queries::{
    self, CommunityOverview, DashboardStats, GroupFilter, DASHBOARD_RECENT_LIMIT,
};
use crate::store::{GroupStore, StoreError, StoreResult};
use crate::validation::{
    validate_community_patch, validate_group_patch, validate_new_community, validate_new_group,
    validate_new_participant, ValidationErrors,
};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for admin use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeskError {
    /// Form input rejected before reaching the store.
    Validation(ValidationErrors),
    /// Target entity does not exist.
    Store(StoreError),
}

impl Display for DeskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid input: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DeskError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationErrors> for DeskError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for DeskError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub type DeskResult<T> = Result<T, DeskError>;

/// Service facade owning one store.
pub struct GroupDesk {
    store: GroupStore,
}

impl GroupDesk {
    pub fn new(store: GroupStore) -> Self {
        Self { store }
    }

    pub fn with_config(config: StoreConfig, clock: impl Clock + 'static) -> Self {
        Self::new(GroupStore::new(config, clock))
    }

    pub fn store(&self) -> &GroupStore {
        &self.store
    }

    /// Mutable store access, for observer registration.
    pub fn store_mut(&mut self) -> &mut GroupStore {
        &mut self.store
    }

    pub fn into_store(self) -> GroupStore {
        self.store
    }

    // ---- groups ----

    pub fn create_group(&mut self, input: NewGroup) -> DeskResult<Group> {
        let input = validate_new_group(input).inspect_err(log_rejected("group_create"))?;
        Ok(self.store.create_group(input))
    }

    pub fn edit_group(&mut self, id: GroupId, patch: GroupPatch) -> DeskResult<Group> {
        let patch = validate_group_patch(patch).inspect_err(log_rejected("group_update"))?;
        Ok(self.store.update_group(id, patch)?)
    }

    pub fn delete_group(&mut self, id: GroupId) -> DeskResult<Group> {
        Ok(self.store.delete_group(id)?)
    }

    pub fn add_participant(
        &mut self,
        group_id: GroupId,
        input: NewParticipant,
    ) -> DeskResult<Participant> {
        let input =
            validate_new_participant(input).inspect_err(log_rejected("participant_add"))?;
        Ok(self.store.add_participant(group_id, input)?)
    }

    pub fn remove_participant(
        &mut self,
        group_id: GroupId,
        participant_id: ParticipantId,
    ) -> DeskResult<Participant> {
        Ok(self.store.remove_participant(group_id, participant_id)?)
    }

    pub fn promote_participant(
        &mut self,
        group_id: GroupId,
        participant_id: ParticipantId,
    ) -> DeskResult<Participant> {
        Ok(self.store.promote_participant(group_id, participant_id)?)
    }

    // ---- communities ----

    pub fn create_community(&mut self, input: NewCommunity) -> DeskResult<Community> {
        let input =
            validate_new_community(input).inspect_err(log_rejected("community_create"))?;
        Ok(self.store.create_community(input))
    }

    pub fn edit_community(
        &mut self,
        id: CommunityId,
        patch: CommunityPatch,
    ) -> DeskResult<Community> {
        let patch =
            validate_community_patch(patch).inspect_err(log_rejected("community_update"))?;
        Ok(self.store.update_community(id, patch)?)
    }

    pub fn delete_community(&mut self, id: CommunityId) -> DeskResult<Community> {
        Ok(self.store.delete_community(id)?)
    }

    pub fn add_group_to_community(
        &mut self,
        community_id: CommunityId,
        group_id: GroupId,
    ) -> DeskResult<Community> {
        Ok(self.store.add_group_to_community(community_id, group_id)?)
    }

    pub fn remove_group_from_community(
        &mut self,
        community_id: CommunityId,
        group_id: GroupId,
    ) -> DeskResult<Community> {
        Ok(self
            .store
            .remove_group_from_community(community_id, group_id)?)
    }

    // ---- reads ----

    pub fn search_groups(&self, filter: &GroupFilter) -> Vec<&Group> {
        queries::search_groups(&self.store, filter)
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        queries::dashboard_stats(&self.store)
    }

    /// Groups for the dashboard "recent" panel.
    pub fn recent_groups(&self) -> Vec<&Group> {
        queries::recent_groups(&self.store, DASHBOARD_RECENT_LIMIT)
    }

    pub fn community_overview(&self, id: CommunityId) -> StoreResult<CommunityOverview<'_>> {
        queries::community_overview(&self.store, id)
    }
}

fn log_rejected(operation: &'static str) -> impl Fn(&ValidationErrors) {
    move |err: &ValidationErrors| {
        debug!(
            "event={operation} module=service status=rejected fields={}",
            err.len()
        )
    }
}
