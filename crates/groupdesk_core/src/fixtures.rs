//! Built-in seed data loaded into a fresh store.

use crate::model::community::{Community, CommunityId};
use crate::model::group::{Group, GroupId, Participant, ParticipantId, Privacy, Role};
use chrono::NaiveDate;

/// Seed groups and communities in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSet {
    pub groups: Vec<Group>,
    pub communities: Vec<Community>,
}

/// Returns the demo data set shown on first launch.
pub fn seed() -> FixtureSet {
    let family = Group {
        id: GroupId(1),
        name: "Family Group".to_string(),
        description: Some("Our lovely family group".to_string()),
        privacy: Privacy::Private,
        avatar: None,
        participants_list: vec![
            participant(1, "John Doe", "+1234567890", Role::Admin, (2024, 1, 15)),
            participant(2, "Jane Smith", "+1234567891", Role::Participant, (2024, 1, 16)),
            participant(3, "Bob Johnson", "+1234567892", Role::Participant, (2024, 1, 17)),
        ],
        created_at: date(2024, 1, 15),
    };

    let work = Group {
        id: GroupId(2),
        name: "Work Team".to_string(),
        description: Some("Project coordination and updates".to_string()),
        privacy: Privacy::Public,
        avatar: None,
        participants_list: vec![
            participant(4, "Alice Brown", "+1234567893", Role::Admin, (2024, 1, 10)),
            participant(5, "Charlie Wilson", "+1234567894", Role::Participant, (2024, 1, 11)),
        ],
        created_at: date(2024, 1, 10),
    };

    let tech = Community {
        id: CommunityId(1),
        name: "Tech Community".to_string(),
        description: Some("All things tech related".to_string()),
        avatar: None,
        groups: vec![GroupId(1), GroupId(2)],
        created_at: date(2024, 1, 1),
    };

    FixtureSet {
        groups: vec![family, work],
        communities: vec![tech],
    }
}

fn participant(
    id: u64,
    name: &str,
    phone: &str,
    role: Role,
    joined: (i32, u32, u32),
) -> Participant {
    Participant {
        id: ParticipantId(id),
        name: name.to_string(),
        phone: phone.to_string(),
        role,
        joined_at: date(joined.0, joined.1, joined.2),
    }
}

// Invalid triples map to the epoch date.
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
