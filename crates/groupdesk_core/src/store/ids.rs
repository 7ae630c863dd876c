//! Monotonic id allocation.

use crate::model::community::{Community, CommunityId};
use crate::model::group::{Group, GroupId, ParticipantId};

/// Per-kind counters; each `next_*` call returns a value never handed out
/// before by this allocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IdAllocator {
    next_group: u64,
    next_participant: u64,
    next_community: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            next_group: 1,
            next_participant: 1,
            next_community: 1,
        }
    }
}

impl IdAllocator {
    /// Advances counters past every id already present in seeded state.
    pub(crate) fn reserve_existing(&mut self, groups: &[Group], communities: &[Community]) {
        for group in groups {
            self.next_group = self.next_group.max(group.id.0 + 1);
            for participant in &group.participants_list {
                self.next_participant = self.next_participant.max(participant.id.0 + 1);
            }
        }
        for community in communities {
            self.next_community = self.next_community.max(community.id.0 + 1);
        }
    }

    pub(crate) fn next_group(&mut self) -> GroupId {
        let id = GroupId(self.next_group);
        self.next_group += 1;
        id
    }

    pub(crate) fn next_participant(&mut self) -> ParticipantId {
        let id = ParticipantId(self.next_participant);
        self.next_participant += 1;
        id
    }

    pub(crate) fn next_community(&mut self) -> CommunityId {
        let id = CommunityId(self.next_community);
        self.next_community += 1;
        id
    }
}
