//! Community domain model.
//!
//! # Invariants
//! - `groups` holds references, not ownership; an id may point at a group
//!   that no longer exists.
//! - `groups` is ordered and never contains the same id twice.

use crate::model::group::GroupId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// Store-allocated community identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommunityId(pub u64);

impl Display for CommunityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical community record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    pub id: CommunityId,
    pub name: String,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub groups: Vec<GroupId>,
    pub created_at: NaiveDate,
}

impl Community {
    pub fn contains_group(&self, group_id: GroupId) -> bool {
        self.groups.contains(&group_id)
    }
}

/// Input for creating a community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommunity {
    pub name: String,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub groups: Vec<GroupId>,
}

impl NewCommunity {
    pub fn new(name: impl Into<String>, groups: Vec<GroupId>) -> Self {
        Self {
            name: name.into(),
            description: None,
            avatar: None,
            groups,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Field-level update for a community.
///
/// `groups` is a full replacement list; it is de-duplicated on apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunityPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub avatar: Option<Option<String>>,
    pub groups: Option<Vec<GroupId>>,
}

impl CommunityPatch {
    pub fn groups(groups: Vec<GroupId>) -> Self {
        Self {
            groups: Some(groups),
            ..Self::default()
        }
    }

    pub(crate) fn apply(self, community: &mut Community) {
        if let Some(name) = self.name {
            community.name = name;
        }
        if let Some(description) = self.description {
            community.description = description;
        }
        if let Some(avatar) = self.avatar {
            community.avatar = avatar;
        }
        if let Some(groups) = self.groups {
            community.groups = dedup_group_ids(groups);
        }
    }
}

/// Removes repeated ids while keeping first-seen order.
pub fn dedup_group_ids(ids: Vec<GroupId>) -> Vec<GroupId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::{dedup_group_ids, Community, CommunityId, CommunityPatch};
    use crate::model::group::GroupId;
    use chrono::NaiveDate;

    #[test]
    fn dedup_keeps_first_seen_order() {
        let ids = vec![GroupId(3), GroupId(1), GroupId(3), GroupId(2), GroupId(1)];
        assert_eq!(
            dedup_group_ids(ids),
            vec![GroupId(3), GroupId(1), GroupId(2)]
        );
    }

    #[test]
    fn groups_patch_replaces_and_dedups() {
        let mut community = Community {
            id: CommunityId(1),
            name: "Tech".to_string(),
            description: None,
            avatar: None,
            groups: vec![GroupId(1)],
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
        };

        CommunityPatch::groups(vec![GroupId(1), GroupId(9), GroupId(9)]).apply(&mut community);
        assert_eq!(community.groups, vec![GroupId(1), GroupId(9)]);
        assert_eq!(community.name, "Tech");
    }
}
