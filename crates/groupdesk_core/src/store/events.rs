//! Change notifications for store observers.

use crate::model::community::CommunityId;
use crate::model::group::{GroupId, ParticipantId};
use std::collections::BTreeMap;

/// One successful store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    GroupCreated(GroupId),
    GroupUpdated(GroupId),
    GroupDeleted(GroupId),
    ParticipantAdded {
        group_id: GroupId,
        participant_id: ParticipantId,
    },
    ParticipantRemoved {
        group_id: GroupId,
        participant_id: ParticipantId,
    },
    ParticipantPromoted {
        group_id: GroupId,
        participant_id: ParticipantId,
    },
    CommunityCreated(CommunityId),
    CommunityUpdated(CommunityId),
    CommunityDeleted(CommunityId),
}

impl StoreEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GroupCreated(_) => "group_created",
            Self::GroupUpdated(_) => "group_updated",
            Self::GroupDeleted(_) => "group_deleted",
            Self::ParticipantAdded { .. } => "participant_added",
            Self::ParticipantRemoved { .. } => "participant_removed",
            Self::ParticipantPromoted { .. } => "participant_promoted",
            Self::CommunityCreated(_) => "community_created",
            Self::CommunityUpdated(_) => "community_updated",
            Self::CommunityDeleted(_) => "community_deleted",
        }
    }
}

/// Receiver of store change notifications.
///
/// `revision` is the store revision after the mutation was applied.
pub trait StoreObserver {
    fn on_event(&mut self, event: &StoreEvent, revision: u64);
}

impl<F> StoreObserver for F
where
    F: FnMut(&StoreEvent, u64),
{
    fn on_event(&mut self, event: &StoreEvent, revision: u64) {
        self(event, revision)
    }
}

/// Handle returned by `GroupStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Observers keyed by subscription order.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    observers: BTreeMap<SubscriptionId, Box<dyn StoreObserver>>,
}

impl ObserverRegistry {
    pub(crate) fn subscribe(&mut self, observer: Box<dyn StoreObserver>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.observers.insert(id, observer);
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(&id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn notify(&mut self, event: &StoreEvent, revision: u64) {
        for observer in self.observers.values_mut() {
            observer.on_event(event, revision);
        }
    }
}
