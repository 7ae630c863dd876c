//! `GroupStore`: the single writer path for group/community state.
//!
//! # Responsibility
//! - Provide create/read/update/delete over groups, participants and
//!   communities.
//! - Resolve community group references, tolerating dangling ids.
//! - Apply the configured `GroupDeletePolicy` on group deletion.
//!
//! # Invariants
//! - A new group holds exactly one admin participant (the creator).
//! - Failed operations do not bump `revision` and emit no event.
//! - Every successful mutation bumps `revision` once per emitted event.

use crate::clock::{Clock, SystemClock};
use crate::config::{GroupDeletePolicy, StoreConfig};
use crate::fixtures;
use crate::model::community::{
    dedup_group_ids, Community, CommunityId, CommunityPatch, NewCommunity,
};
use crate::model::group::{
    Group, GroupId, GroupPatch, NewGroup, NewParticipant, Participant, ParticipantId, Role,
};
use crate::store::error::{StoreError, StoreResult};
use crate::store::events::{ObserverRegistry, StoreEvent, StoreObserver, SubscriptionId};
use crate::store::ids::IdAllocator;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Display name given to the creator participant of a new group.
pub const CREATOR_NAME: &str = "You";
/// Phone number recorded for the creator participant.
pub const CREATOR_PHONE: &str = "+1234567890";

/// Owned, serializable copy of the full store state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub revision: u64,
    pub groups: Vec<Group>,
    pub communities: Vec<Community>,
}

impl StoreSnapshot {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// In-memory group/community store.
pub struct GroupStore {
    config: StoreConfig,
    clock: Box<dyn Clock>,
    groups: Vec<Group>,
    communities: Vec<Community>,
    ids: IdAllocator,
    revision: u64,
    observers: ObserverRegistry,
}

impl Default for GroupStore {
    fn default() -> Self {
        Self::new(StoreConfig::default(), SystemClock)
    }
}

impl GroupStore {
    /// Creates a store, seeding fixtures when `config.seed_fixtures` is set.
    pub fn new(config: StoreConfig, clock: impl Clock + 'static) -> Self {
        let mut store = Self {
            config,
            clock: Box::new(clock),
            groups: Vec::new(),
            communities: Vec::new(),
            ids: IdAllocator::default(),
            revision: 0,
            observers: ObserverRegistry::default(),
        };

        if config.seed_fixtures {
            let seed = fixtures::seed();
            store.ids.reserve_existing(&seed.groups, &seed.communities);
            store.groups = seed.groups;
            store.communities = seed.communities;
        }

        info!(
            "event=store_init module=store status=ok groups={} communities={} delete_policy={}",
            store.groups.len(),
            store.communities.len(),
            config.delete_policy.as_str()
        );
        store
    }

    pub fn config(&self) -> StoreConfig {
        self.config
    }

    /// Monotonic counter bumped on every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ---- observation ----

    pub fn subscribe(&mut self, observer: impl StoreObserver + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Removes an observer; returns `false` when the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ---- reads ----

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn communities(&self) -> &[Community] {
        &self.communities
    }

    pub fn community(&self, id: CommunityId) -> Option<&Community> {
        self.communities.iter().find(|c| c.id == id)
    }

    /// Groups referenced by a community, in reference order.
    ///
    /// References to absent groups are skipped.
    pub fn community_groups(&self, id: CommunityId) -> StoreResult<Vec<&Group>> {
        let community = self
            .community(id)
            .ok_or(StoreError::CommunityNotFound(id))?;
        Ok(community
            .groups
            .iter()
            .filter_map(|group_id| self.group(*group_id))
            .collect())
    }

    /// Groups not yet referenced by a community, in store order.
    pub fn available_groups(&self, id: CommunityId) -> StoreResult<Vec<&Group>> {
        let community = self
            .community(id)
            .ok_or(StoreError::CommunityNotFound(id))?;
        Ok(self
            .groups
            .iter()
            .filter(|g| !community.contains_group(g.id))
            .collect())
    }

    /// References held by a community that point at no existing group.
    pub fn dangling_group_ids(&self, id: CommunityId) -> StoreResult<Vec<GroupId>> {
        let community = self
            .community(id)
            .ok_or(StoreError::CommunityNotFound(id))?;
        Ok(community
            .groups
            .iter()
            .copied()
            .filter(|group_id| self.group(*group_id).is_none())
            .collect())
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            revision: self.revision,
            groups: self.groups.clone(),
            communities: self.communities.clone(),
        }
    }

    // ---- group writes ----

    /// Creates a group whose only participant is the creator, as admin.
    pub fn create_group(&mut self, input: NewGroup) -> Group {
        let today = self.clock.today();
        let group = Group {
            id: self.ids.next_group(),
            name: input.name,
            description: input.description,
            privacy: input.privacy,
            avatar: input.avatar,
            participants_list: vec![Participant {
                id: self.ids.next_participant(),
                name: CREATOR_NAME.to_string(),
                phone: CREATOR_PHONE.to_string(),
                role: Role::Admin,
                joined_at: today,
            }],
            created_at: today,
        };

        self.groups.push(group.clone());
        info!(
            "event=group_create module=store status=ok group_id={} privacy={}",
            group.id, group.privacy
        );
        self.commit(StoreEvent::GroupCreated(group.id));
        group
    }

    /// Removes a group and returns it.
    ///
    /// Under `GroupDeletePolicy::Cascade` the id is also removed from every
    /// community, each of which emits `CommunityUpdated`.
    pub fn delete_group(&mut self, id: GroupId) -> StoreResult<Group> {
        let index = self.group_index(id).inspect_err(|err| {
            warn!(
                "event=group_delete module=store status=error code={} group_id={id}",
                err.code()
            )
        })?;
        let removed = self.groups.remove(index);
        info!("event=group_delete module=store status=ok group_id={id}");
        self.commit(StoreEvent::GroupDeleted(id));

        match self.config.delete_policy {
            GroupDeletePolicy::Cascade => {
                let mut touched = Vec::new();
                for community in &mut self.communities {
                    let before = community.groups.len();
                    community.groups.retain(|group_id| *group_id != id);
                    if community.groups.len() != before {
                        touched.push(community.id);
                    }
                }
                for community_id in touched {
                    debug!(
                        "event=group_delete_cascade module=store status=ok group_id={id} community_id={community_id}"
                    );
                    self.commit(StoreEvent::CommunityUpdated(community_id));
                }
            }
            GroupDeletePolicy::KeepReferences => {}
        }

        Ok(removed)
    }

    /// Applies a field-level patch and returns the updated group.
    pub fn update_group(&mut self, id: GroupId, patch: GroupPatch) -> StoreResult<Group> {
        let index = self.group_index(id).inspect_err(|err| {
            warn!(
                "event=group_update module=store status=error code={} group_id={id}",
                err.code()
            )
        })?;
        let group = &mut self.groups[index];
        patch.apply(group);
        let updated = group.clone();

        info!("event=group_update module=store status=ok group_id={id}");
        self.commit(StoreEvent::GroupUpdated(id));
        Ok(updated)
    }

    /// Appends a regular participant to a group.
    pub fn add_participant(
        &mut self,
        group_id: GroupId,
        input: NewParticipant,
    ) -> StoreResult<Participant> {
        let index = self.group_index(group_id).inspect_err(|err| {
            warn!(
                "event=participant_add module=store status=error code={} group_id={group_id}",
                err.code()
            )
        })?;
        let participant = Participant {
            id: self.ids.next_participant(),
            name: input.name,
            phone: input.phone,
            role: Role::Participant,
            joined_at: self.clock.today(),
        };
        let group = &mut self.groups[index];
        group.participants_list.push(participant.clone());

        info!(
            "event=participant_add module=store status=ok group_id={group_id} participant_id={} participants={}",
            participant.id,
            group.participants()
        );
        self.commit(StoreEvent::ParticipantAdded {
            group_id,
            participant_id: participant.id,
        });
        Ok(participant)
    }

    /// Removes a participant and returns it. Removing the last admin is
    /// allowed.
    pub fn remove_participant(
        &mut self,
        group_id: GroupId,
        participant_id: ParticipantId,
    ) -> StoreResult<Participant> {
        let index = self.group_index(group_id).inspect_err(|err| {
            warn!(
                "event=participant_remove module=store status=error code={} group_id={group_id}",
                err.code()
            )
        })?;
        let group = &mut self.groups[index];
        let Some(position) = group
            .participants_list
            .iter()
            .position(|p| p.id == participant_id)
        else {
            warn!(
                "event=participant_remove module=store status=error code=participant_not_found group_id={group_id} participant_id={participant_id}"
            );
            return Err(StoreError::ParticipantNotFound {
                group_id,
                participant_id,
            });
        };
        let removed = group.participants_list.remove(position);

        info!(
            "event=participant_remove module=store status=ok group_id={group_id} participant_id={participant_id} participants={}",
            group.participants()
        );
        self.commit(StoreEvent::ParticipantRemoved {
            group_id,
            participant_id,
        });
        Ok(removed)
    }

    /// Grants admin role. Promoting an admin again changes nothing but still
    /// succeeds.
    pub fn promote_participant(
        &mut self,
        group_id: GroupId,
        participant_id: ParticipantId,
    ) -> StoreResult<Participant> {
        let index = self.group_index(group_id).inspect_err(|err| {
            warn!(
                "event=participant_promote module=store status=error code={} group_id={group_id}",
                err.code()
            )
        })?;
        let Some(participant) = self.groups[index].participant_mut(participant_id) else {
            warn!(
                "event=participant_promote module=store status=error code=participant_not_found group_id={group_id} participant_id={participant_id}"
            );
            return Err(StoreError::ParticipantNotFound {
                group_id,
                participant_id,
            });
        };

        if participant.role == Role::Admin {
            debug!(
                "event=participant_promote module=store status=unchanged group_id={group_id} participant_id={participant_id}"
            );
            return Ok(participant.clone());
        }

        participant.role = Role::Admin;
        let promoted = participant.clone();
        info!(
            "event=participant_promote module=store status=ok group_id={group_id} participant_id={participant_id}"
        );
        self.commit(StoreEvent::ParticipantPromoted {
            group_id,
            participant_id,
        });
        Ok(promoted)
    }

    // ---- community writes ----

    /// Creates a community. Group ids are stored as given (minus repeats);
    /// ids with no group are kept and filtered on read.
    pub fn create_community(&mut self, input: NewCommunity) -> Community {
        let community = Community {
            id: self.ids.next_community(),
            name: input.name,
            description: input.description,
            avatar: input.avatar,
            groups: dedup_group_ids(input.groups),
            created_at: self.clock.today(),
        };

        self.communities.push(community.clone());
        info!(
            "event=community_create module=store status=ok community_id={} groups={}",
            community.id,
            community.groups.len()
        );
        self.commit(StoreEvent::CommunityCreated(community.id));
        community
    }

    pub fn delete_community(&mut self, id: CommunityId) -> StoreResult<Community> {
        let index = self.community_index(id).inspect_err(|err| {
            warn!(
                "event=community_delete module=store status=error code={} community_id={id}",
                err.code()
            )
        })?;
        let removed = self.communities.remove(index);
        info!("event=community_delete module=store status=ok community_id={id}");
        self.commit(StoreEvent::CommunityDeleted(id));
        Ok(removed)
    }

    /// Applies a field-level patch and returns the updated community.
    pub fn update_community(
        &mut self,
        id: CommunityId,
        patch: CommunityPatch,
    ) -> StoreResult<Community> {
        let index = self.community_index(id).inspect_err(|err| {
            warn!(
                "event=community_update module=store status=error code={} community_id={id}",
                err.code()
            )
        })?;
        let community = &mut self.communities[index];
        patch.apply(community);
        let updated = community.clone();

        info!(
            "event=community_update module=store status=ok community_id={id} groups={}",
            updated.groups.len()
        );
        self.commit(StoreEvent::CommunityUpdated(id));
        Ok(updated)
    }

    /// Appends a reference to an existing group.
    ///
    /// An existing member leaves the community unchanged and emits nothing.
    pub fn add_group_to_community(
        &mut self,
        community_id: CommunityId,
        group_id: GroupId,
    ) -> StoreResult<Community> {
        let community = self.membership_target(community_id, "community_add_group")?;
        if self.group(group_id).is_none() {
            warn!(
                "event=community_add_group module=store status=error code=group_not_found community_id={community_id} group_id={group_id}"
            );
            return Err(StoreError::GroupNotFound(group_id));
        }
        if community.contains_group(group_id) {
            debug!(
                "event=community_add_group module=store status=unchanged community_id={community_id} group_id={group_id}"
            );
            return Ok(community.clone());
        }

        let mut groups = community.groups.clone();
        groups.push(group_id);
        self.update_community(community_id, CommunityPatch::groups(groups))
    }

    /// Drops a group reference, including a dangling one.
    ///
    /// A non-member group that exists leaves the community unchanged and
    /// emits nothing; an id that is neither a member nor a group is
    /// `GroupNotFound`.
    pub fn remove_group_from_community(
        &mut self,
        community_id: CommunityId,
        group_id: GroupId,
    ) -> StoreResult<Community> {
        let community = self.membership_target(community_id, "community_remove_group")?;
        if !community.contains_group(group_id) {
            if self.group(group_id).is_none() {
                warn!(
                    "event=community_remove_group module=store status=error code=group_not_found community_id={community_id} group_id={group_id}"
                );
                return Err(StoreError::GroupNotFound(group_id));
            }
            debug!(
                "event=community_remove_group module=store status=unchanged community_id={community_id} group_id={group_id}"
            );
            return Ok(community.clone());
        }

        let groups = community
            .groups
            .iter()
            .copied()
            .filter(|id| *id != group_id)
            .collect();
        self.update_community(community_id, CommunityPatch::groups(groups))
    }

    fn membership_target(
        &self,
        community_id: CommunityId,
        event: &'static str,
    ) -> StoreResult<&Community> {
        self.community(community_id).ok_or_else(|| {
            warn!(
                "event={event} module=store status=error code=community_not_found community_id={community_id}"
            );
            StoreError::CommunityNotFound(community_id)
        })
    }

    fn group_index(&self, id: GroupId) -> StoreResult<usize> {
        self.groups
            .iter()
            .position(|g| g.id == id)
            .ok_or(StoreError::GroupNotFound(id))
    }

    fn community_index(&self, id: CommunityId) -> StoreResult<usize> {
        self.communities
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::CommunityNotFound(id))
    }

    fn commit(&mut self, event: StoreEvent) {
        self.revision += 1;
        self.observers.notify(&event, self.revision);
    }
}

#[cfg(test)]
mod tests {
    use super::{GroupStore, CREATOR_NAME};
    use crate::clock::FixedClock;
    use crate::config::StoreConfig;
    use crate::model::group::{NewGroup, NewParticipant, Privacy, Role};
    use chrono::NaiveDate;

    fn empty_store() -> GroupStore {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        GroupStore::new(StoreConfig::empty(), FixedClock(today))
    }

    #[test]
    fn create_group_seeds_creator_admin() {
        let mut store = empty_store();
        let group = store.create_group(NewGroup::new("Test", Privacy::Public));

        assert_eq!(group.participants(), 1);
        assert_eq!(group.participants_list[0].name, CREATOR_NAME);
        assert_eq!(group.participants_list[0].role, Role::Admin);
        assert_eq!(group.created_at, group.participants_list[0].joined_at);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn participant_ids_do_not_repeat_across_groups() {
        let mut store = empty_store();
        let a = store.create_group(NewGroup::new("Alpha", Privacy::Public));
        let b = store.create_group(NewGroup::new("Beta", Privacy::Private));
        let added = store
            .add_participant(a.id, NewParticipant::new("Bob", "+1"))
            .unwrap();

        assert_ne!(a.participants_list[0].id, b.participants_list[0].id);
        assert_ne!(added.id, b.participants_list[0].id);
    }

    #[test]
    fn failed_operation_leaves_revision_unchanged() {
        let mut store = empty_store();
        let group = store.create_group(NewGroup::new("Test", Privacy::Public));
        let before = store.revision();

        store.delete_group(group.id).unwrap();
        assert!(store.delete_group(group.id).is_err());
        assert_eq!(store.revision(), before + 1);
    }
}
