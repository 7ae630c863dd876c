//! Read projections over a store snapshot.
//!
//! # Invariants
//! - Projections are pure functions of store state.
//! - Community projections skip dangling group references.

use crate::model::community::{Community, CommunityId};
use crate::model::group::{Group, Privacy};
use crate::store::{GroupStore, StoreError, StoreResult};
use serde::Serialize;

/// Groups with more participants than this count as active.
pub const ACTIVE_GROUP_MIN_PARTICIPANTS: usize = 5;
/// Number of groups shown in the dashboard "recent" panel.
pub const DASHBOARD_RECENT_LIMIT: usize = 3;

/// Privacy filter used by the group list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrivacyFilter {
    #[default]
    All,
    Only(Privacy),
}

impl PrivacyFilter {
    fn matches(self, privacy: Privacy) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == privacy,
        }
    }
}

/// Group list search state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFilter {
    /// Case-insensitive substring matched against group names, as typed.
    pub term: String,
    pub privacy: PrivacyFilter,
}

impl GroupFilter {
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            privacy: PrivacyFilter::All,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.term.is_empty() || self.privacy != PrivacyFilter::All
    }

    pub fn matches(&self, group: &Group) -> bool {
        let needle = self.term.to_lowercase();
        let matches_term = needle.is_empty() || group.name.to_lowercase().contains(&needle);
        matches_term && self.privacy.matches(group.privacy)
    }
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_groups: usize,
    pub total_participants: usize,
    pub communities: usize,
    pub active_groups: usize,
}

/// Community with its resolved groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityOverview<'a> {
    pub community: &'a Community,
    pub groups: Vec<&'a Group>,
    pub total_participants: usize,
}

pub fn search_groups<'a>(store: &'a GroupStore, filter: &GroupFilter) -> Vec<&'a Group> {
    store.groups().iter().filter(|g| filter.matches(g)).collect()
}

pub fn dashboard_stats(store: &GroupStore) -> DashboardStats {
    let groups = store.groups();
    DashboardStats {
        total_groups: groups.len(),
        total_participants: groups.iter().map(Group::participants).sum(),
        communities: store.communities().len(),
        active_groups: groups
            .iter()
            .filter(|g| g.participants() > ACTIVE_GROUP_MIN_PARTICIPANTS)
            .count(),
    }
}

/// First `limit` groups in store order.
pub fn recent_groups(store: &GroupStore, limit: usize) -> Vec<&Group> {
    store.groups().iter().take(limit).collect()
}

pub fn community_overview(
    store: &GroupStore,
    id: CommunityId,
) -> StoreResult<CommunityOverview<'_>> {
    let community = store
        .community(id)
        .ok_or(StoreError::CommunityNotFound(id))?;
    let groups = store.community_groups(id)?;
    let total_participants = groups.iter().map(|g| g.participants()).sum();
    Ok(CommunityOverview {
        community,
        groups,
        total_participants,
    })
}

#[cfg(test)]
mod tests {
    use super::{GroupFilter, PrivacyFilter};
    use crate::fixtures;
    use crate::model::group::Privacy;

    #[test]
    fn filter_combines_term_and_privacy() {
        let seed = fixtures::seed();
        let family = &seed.groups[0];
        let work = &seed.groups[1];

        let filter = GroupFilter {
            term: "TEAM".to_string(),
            privacy: PrivacyFilter::Only(Privacy::Public),
        };
        assert!(filter.matches(work));
        assert!(!filter.matches(family));

        let private_only = GroupFilter {
            term: String::new(),
            privacy: PrivacyFilter::Only(Privacy::Private),
        };
        assert!(private_only.matches(family));
        assert!(!private_only.matches(work));
    }

    #[test]
    fn term_is_matched_as_typed() {
        let seed = fixtures::seed();
        let work = &seed.groups[1];

        assert!(GroupFilter::term("k te").matches(work));
        assert!(!GroupFilter::term("team ").matches(work));
        assert!(GroupFilter::term("team ").is_active());
    }

    #[test]
    fn default_filter_is_inactive_and_matches_everything() {
        let filter = GroupFilter::default();
        assert!(!filter.is_active());
        assert!(fixtures::seed().groups.iter().all(|g| filter.matches(g)));
    }
}
