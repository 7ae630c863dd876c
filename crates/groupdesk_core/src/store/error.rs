//! Store error taxonomy.

use crate::model::community::CommunityId;
use crate::model::group::{GroupId, ParticipantId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Lookup failures from store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    GroupNotFound(GroupId),
    CommunityNotFound(CommunityId),
    ParticipantNotFound {
        group_id: GroupId,
        participant_id: ParticipantId,
    },
}

impl StoreError {
    /// Stable short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::GroupNotFound(_) => "group_not_found",
            Self::CommunityNotFound(_) => "community_not_found",
            Self::ParticipantNotFound { .. } => "participant_not_found",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GroupNotFound(id) => write!(f, "group not found: {id}"),
            Self::CommunityNotFound(id) => write!(f, "community not found: {id}"),
            Self::ParticipantNotFound {
                group_id,
                participant_id,
            } => write!(
                f,
                "participant {participant_id} not found in group {group_id}"
            ),
        }
    }
}

impl Error for StoreError {}
