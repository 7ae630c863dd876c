use chrono::NaiveDate;
use groupdesk_core::{
    CommunityId, CommunityPatch, DashboardStats, DeskError, Field, FieldErrorKind, FixedClock,
    GroupDesk, GroupFilter, GroupId, GroupPatch, NewCommunity, NewGroup, NewParticipant, Privacy,
    PrivacyFilter, StoreConfig, StoreError,
};

fn desk() -> GroupDesk {
    let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
    GroupDesk::with_config(StoreConfig::default(), clock)
}

fn names(groups: Vec<&groupdesk_core::Group>) -> Vec<&str> {
    groups.into_iter().map(|g| g.name.as_str()).collect()
}

fn validation_kind(err: DeskError, field: Field) -> FieldErrorKind {
    match err {
        DeskError::Validation(errors) => errors.for_field(field).unwrap().kind,
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn create_group_trims_accepted_input() {
    let mut desk = desk();
    let group = desk
        .create_group(NewGroup::new("  Book   Club ", Privacy::Private).with_description("   "))
        .unwrap();

    assert_eq!(group.name, "Book   Club");
    assert_eq!(group.description, None);
    assert_eq!(group.participants(), 1);
}

#[test]
fn create_group_rejects_short_name() {
    let mut desk = desk();
    let err = desk
        .create_group(NewGroup::new("ab", Privacy::Public))
        .unwrap_err();
    assert_eq!(
        validation_kind(err, Field::GroupName),
        FieldErrorKind::TooShort { min: 3 }
    );
    assert_eq!(desk.store().groups().len(), 2);
}

#[test]
fn edit_group_validates_then_reports_missing_group() {
    let mut desk = desk();
    let rename = GroupPatch {
        name: Some("Renamed".to_string()),
        ..GroupPatch::default()
    };

    let err = desk.edit_group(GroupId(50), rename.clone()).unwrap_err();
    assert_eq!(err, DeskError::Store(StoreError::GroupNotFound(GroupId(50))));

    let updated = desk.edit_group(GroupId(2), rename).unwrap();
    assert_eq!(updated.name, "Renamed");
}

#[test]
fn add_participant_requires_both_fields() {
    let mut desk = desk();
    let err = desk
        .add_participant(GroupId(1), NewParticipant::new("", "+1"))
        .unwrap_err();
    assert_eq!(
        validation_kind(err, Field::ParticipantName),
        FieldErrorKind::Required
    );
    assert_eq!(desk.store().group(GroupId(1)).unwrap().participants(), 3);

    let added = desk
        .add_participant(GroupId(1), NewParticipant::new(" Dana ", " +1555 "))
        .unwrap();
    assert_eq!(added.name, "Dana");
    assert_eq!(added.phone, "+1555");
}

#[test]
fn create_community_requires_a_group_selection() {
    let mut desk = desk();
    let err = desk
        .create_community(NewCommunity::new("Empty", Vec::new()))
        .unwrap_err();
    assert_eq!(
        validation_kind(err, Field::CommunityGroups),
        FieldErrorKind::NoSelection
    );

    let community = desk
        .create_community(NewCommunity::new("Work Only", vec![GroupId(2)]))
        .unwrap();
    assert_eq!(community.groups, vec![GroupId(2)]);
}

#[test]
fn edit_community_allows_emptying_groups() {
    let mut desk = desk();
    let updated = desk
        .edit_community(CommunityId(1), CommunityPatch::groups(Vec::new()))
        .unwrap();
    assert!(updated.groups.is_empty());
    assert_eq!(desk.community_overview(CommunityId(1)).unwrap().total_participants, 0);
}

#[test]
fn dashboard_stats_on_fixtures() {
    let mut desk = desk();
    assert_eq!(
        desk.dashboard_stats(),
        DashboardStats {
            total_groups: 2,
            total_participants: 5,
            communities: 1,
            active_groups: 0,
        }
    );

    for i in 0..3 {
        desk.add_participant(GroupId(1), NewParticipant::new(format!("m{i}"), "+9"))
            .unwrap();
    }
    let stats = desk.dashboard_stats();
    assert_eq!(stats.total_participants, 8);
    assert_eq!(stats.active_groups, 1);
}

#[test]
fn recent_groups_caps_at_three() {
    let mut desk = desk();
    desk.create_group(NewGroup::new("Third", Privacy::Public))
        .unwrap();
    desk.create_group(NewGroup::new("Fourth", Privacy::Public))
        .unwrap();

    assert_eq!(
        names(desk.recent_groups()),
        vec!["Family Group", "Work Team", "Third"]
    );
}

#[test]
fn search_groups_by_term_and_privacy() {
    let desk = desk();

    assert_eq!(names(desk.search_groups(&GroupFilter::term("group"))), vec!["Family Group"]);
    assert_eq!(
        names(desk.search_groups(&GroupFilter {
            term: String::new(),
            privacy: PrivacyFilter::Only(Privacy::Public),
        })),
        vec!["Work Team"]
    );
    assert!(desk
        .search_groups(&GroupFilter {
            term: "family".to_string(),
            privacy: PrivacyFilter::Only(Privacy::Public),
        })
        .is_empty());
}

#[test]
fn community_overview_sums_resolved_groups() {
    let mut desk = desk();
    let overview = desk.community_overview(CommunityId(1)).unwrap();
    assert_eq!(overview.groups.len(), 2);
    assert_eq!(overview.total_participants, 5);

    desk.delete_group(GroupId(1)).unwrap();
    let overview = desk.community_overview(CommunityId(1)).unwrap();
    assert_eq!(overview.community.groups, vec![GroupId(2)]);
    assert_eq!(overview.total_participants, 2);
}

#[test]
fn delete_and_membership_operations_surface_not_found() {
    let mut desk = desk();
    assert!(matches!(
        desk.delete_community(CommunityId(3)),
        Err(DeskError::Store(StoreError::CommunityNotFound(_)))
    ));
    assert!(matches!(
        desk.remove_group_from_community(CommunityId(3), GroupId(1)),
        Err(DeskError::Store(_))
    ));

    let updated = desk
        .remove_group_from_community(CommunityId(1), GroupId(1))
        .unwrap();
    assert_eq!(updated.groups, vec![GroupId(2)]);
    let updated = desk.add_group_to_community(CommunityId(1), GroupId(1)).unwrap();
    assert_eq!(updated.groups, vec![GroupId(2), GroupId(1)]);
}

#[test]
fn rejected_edit_community_leaves_state_untouched() {
    let mut desk = desk();
    let patch = CommunityPatch {
        name: Some("x".to_string()),
        description: Some(Some("d".repeat(501))),
        ..CommunityPatch::default()
    };

    let err = desk.edit_community(CommunityId(1), patch).unwrap_err();
    assert_eq!(
        validation_kind(err.clone(), Field::CommunityName),
        FieldErrorKind::TooShort { min: 3 }
    );
    assert_eq!(
        validation_kind(err, Field::Description),
        FieldErrorKind::TooLong { max: 500 }
    );

    let community = desk.store().community(CommunityId(1)).unwrap();
    assert_eq!(community.name, "Tech Community");
    assert_eq!(community.groups, vec![GroupId(1), GroupId(2)]);
    assert_eq!(desk.store().revision(), 0);
}

#[test]
fn rejected_edit_group_leaves_state_untouched() {
    let mut desk = desk();
    let patch = GroupPatch {
        name: Some("ab".to_string()),
        privacy: Some(Privacy::Public),
        ..GroupPatch::default()
    };

    let err = desk.edit_group(GroupId(1), patch).unwrap_err();
    assert_eq!(
        validation_kind(err, Field::GroupName),
        FieldErrorKind::TooShort { min: 3 }
    );

    let group = desk.store().group(GroupId(1)).unwrap();
    assert_eq!(group.name, "Family Group");
    assert_eq!(group.privacy, Privacy::Private);
    assert_eq!(desk.store().revision(), 0);
}

#[test]
fn search_term_is_not_trimmed() {
    let desk = desk();
    assert!(desk.search_groups(&GroupFilter::term("team ")).is_empty());
    assert_eq!(names(desk.search_groups(&GroupFilter::term("Team"))), vec!["Work Team"]);
}
