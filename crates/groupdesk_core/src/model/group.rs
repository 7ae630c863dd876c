//! Group and participant domain model.
//!
//! # Responsibility
//! - Define the group record and its ordered participant list.
//! - Provide the typed input (`NewGroup`, `NewParticipant`) and patch
//!   (`GroupPatch`) shapes accepted by the store.
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - `participants()` always equals `participants_list.len()`.
//! - `GroupPatch` cannot reach the participant list.

use chrono::NaiveDate;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Store-allocated group identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub u64);

impl Display for GroupId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-allocated participant identifier.
///
/// Unique within its owning group; the store allocates from one counter, so
/// in practice ids are unique across all groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u64);

impl Display for ParticipantId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Group visibility setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Privacy {
    /// Only invited participants can join.
    Private,
    /// Anyone with the link can join.
    Public,
}

impl Privacy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }
}

impl Display for Privacy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Participant role within one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Participant,
}

/// One member of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub phone: String,
    pub role: Role,
    pub joined_at: NaiveDate,
}

impl Participant {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Canonical group record.
///
/// Fields are readable by callers, but the store only hands out shared
/// references or owned clones; mutation goes through store operations.
/// Serialized output carries the derived `participants` count; it is
/// ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub description: Option<String>,
    pub privacy: Privacy,
    pub avatar: Option<String>,
    pub participants_list: Vec<Participant>,
    pub created_at: NaiveDate,
}

impl Group {
    /// Participant count, derived from the participant list.
    pub fn participants(&self) -> usize {
        self.participants_list.len()
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants_list.iter().find(|p| p.id == id)
    }

    pub fn admins(&self) -> impl Iterator<Item = &Participant> {
        self.participants_list.iter().filter(|p| p.is_admin())
    }

    pub(crate) fn participant_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants_list.iter_mut().find(|p| p.id == id)
    }
}

impl Serialize for Group {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Group", 8)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("privacy", &self.privacy)?;
        state.serialize_field("avatar", &self.avatar)?;
        state.serialize_field("participants", &self.participants())?;
        state.serialize_field("participants_list", &self.participants_list)?;
        state.serialize_field("created_at", &self.created_at)?;
        state.end()
    }
}

/// Input for creating a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    pub name: String,
    pub description: Option<String>,
    pub privacy: Privacy,
    pub avatar: Option<String>,
}

impl NewGroup {
    pub fn new(name: impl Into<String>, privacy: Privacy) -> Self {
        Self {
            name: name.into(),
            description: None,
            privacy,
            avatar: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Input for adding a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParticipant {
    pub name: String,
    pub phone: String,
}

impl NewParticipant {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// Field-level update for a group.
///
/// `None` leaves a field untouched. For optional fields, `Some(None)` clears
/// the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub privacy: Option<Privacy>,
    pub avatar: Option<Option<String>>,
}

impl GroupPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.privacy.is_none()
            && self.avatar.is_none()
    }

    pub(crate) fn apply(self, group: &mut Group) {
        if let Some(name) = self.name {
            group.name = name;
        }
        if let Some(description) = self.description {
            group.description = description;
        }
        if let Some(privacy) = self.privacy {
            group.privacy = privacy;
        }
        if let Some(avatar) = self.avatar {
            group.avatar = avatar;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Group, GroupId, GroupPatch, Participant, ParticipantId, Privacy, Role};
    use chrono::NaiveDate;

    fn sample_group() -> Group {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
        Group {
            id: GroupId(7),
            name: "Book Club".to_string(),
            description: Some("monthly reads".to_string()),
            privacy: Privacy::Private,
            avatar: None,
            participants_list: vec![Participant {
                id: ParticipantId(1),
                name: "Ann".to_string(),
                phone: "+100".to_string(),
                role: Role::Admin,
                joined_at: day,
            }],
            created_at: day,
        }
    }

    #[test]
    fn patch_only_touches_supplied_fields() {
        let mut group = sample_group();
        GroupPatch {
            privacy: Some(Privacy::Public),
            description: Some(None),
            ..GroupPatch::default()
        }
        .apply(&mut group);

        assert_eq!(group.name, "Book Club");
        assert_eq!(group.privacy, Privacy::Public);
        assert_eq!(group.description, None);
        assert_eq!(group.participants(), 1);
    }

    #[test]
    fn privacy_serializes_as_snake_case() {
        let json = serde_json::to_string(&Privacy::Private).unwrap();
        assert_eq!(json, "\"private\"");
    }

    #[test]
    fn serialized_group_carries_participant_count_and_reads_back() {
        let group = sample_group();
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["participants"], 1);
        assert_eq!(json["participants_list"][0]["role"], "admin");

        let back: Group = serde_json::from_value(json).unwrap();
        assert_eq!(back, group);
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(GroupPatch::default().is_empty());
        let patch = GroupPatch {
            name: Some("x".to_string()),
            ..GroupPatch::default()
        };
        assert!(!patch.is_empty());
    }
}
