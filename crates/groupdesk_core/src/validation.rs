//! Form-level input rules for create/edit flows.
//!
//! # Responsibility
//! - Check user input before it reaches the store.
//! - Normalize accepted input (trimmed names, empty descriptions to `None`).
//!
//! # Invariants
//! - Validation never touches store state.
//! - All failing fields are reported together, in form order.

use crate::model::community::{CommunityPatch, NewCommunity};
use crate::model::group::{GroupPatch, NewGroup, NewParticipant};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const NAME_MIN_CHARS: usize = 3;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Form field a validation error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    GroupName,
    CommunityName,
    Description,
    CommunityGroups,
    ParticipantName,
    ParticipantPhone,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Self::GroupName => "Group name",
            Self::CommunityName => "Community name",
            Self::Description => "Description",
            Self::CommunityGroups => "Groups",
            Self::ParticipantName => "Participant name",
            Self::ParticipantPhone => "Phone number",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Required,
    TooShort { min: usize },
    TooLong { max: usize },
    NoSelection,
}

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = self.field.label();
        match self.kind {
            FieldErrorKind::Required => write!(f, "{label} is required"),
            FieldErrorKind::TooShort { min } => {
                write!(f, "{label} must be at least {min} characters")
            }
            FieldErrorKind::TooLong { max } => {
                write!(f, "{label} must be at most {max} characters")
            }
            FieldErrorKind::NoSelection => {
                write!(f, "Select at least one group for the community")
            }
        }
    }
}

/// Non-empty set of field errors from one form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First error recorded for `field`, if any.
    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl Error for ValidationErrors {}

#[derive(Default)]
struct Collector {
    errors: Vec<FieldError>,
}

impl Collector {
    fn push(&mut self, field: Field, kind: FieldErrorKind) {
        self.errors.push(FieldError { field, kind });
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationErrors {
                errors: self.errors,
            })
        }
    }

    fn name(&mut self, field: Field, raw: &str) -> String {
        let normalized = normalize_name(raw);
        if normalized.is_empty() {
            self.push(field, FieldErrorKind::Required);
        } else if normalized.chars().count() < NAME_MIN_CHARS {
            self.push(
                field,
                FieldErrorKind::TooShort {
                    min: NAME_MIN_CHARS,
                },
            );
        }
        normalized
    }

    fn description(&mut self, raw: Option<String>) -> Option<String> {
        let normalized = normalize_description(raw);
        if let Some(value) = &normalized {
            if value.chars().count() > DESCRIPTION_MAX_CHARS {
                self.push(
                    Field::Description,
                    FieldErrorKind::TooLong {
                        max: DESCRIPTION_MAX_CHARS,
                    },
                );
            }
        }
        normalized
    }

    fn required(&mut self, field: Field, raw: &str) -> String {
        let trimmed = raw.trim().to_string();
        if trimmed.is_empty() {
            self.push(field, FieldErrorKind::Required);
        }
        trimmed
    }
}

/// Trims surrounding whitespace; inner spacing is kept as typed.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_string()
}

/// Trims; blank descriptions become `None`.
pub fn normalize_description(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Validates the create-group form.
pub fn validate_new_group(input: NewGroup) -> Result<NewGroup, ValidationErrors> {
    let mut collector = Collector::default();
    let name = collector.name(Field::GroupName, &input.name);
    let description = collector.description(input.description);
    collector.finish(NewGroup {
        name,
        description,
        ..input
    })
}

/// Validates the edit-group form. Only supplied fields are checked.
pub fn validate_group_patch(patch: GroupPatch) -> Result<GroupPatch, ValidationErrors> {
    let mut collector = Collector::default();
    let name = patch
        .name
        .map(|raw| collector.name(Field::GroupName, &raw));
    let description = patch
        .description
        .map(|raw| collector.description(raw));
    collector.finish(GroupPatch {
        name,
        description,
        ..patch
    })
}

/// Validates the create-community form, which requires a group selection.
pub fn validate_new_community(input: NewCommunity) -> Result<NewCommunity, ValidationErrors> {
    let mut collector = Collector::default();
    let name = collector.name(Field::CommunityName, &input.name);
    let description = collector.description(input.description);
    if input.groups.is_empty() {
        collector.push(Field::CommunityGroups, FieldErrorKind::NoSelection);
    }
    collector.finish(NewCommunity {
        name,
        description,
        ..input
    })
}

/// Validates the edit-community form. An emptied group list is allowed.
pub fn validate_community_patch(patch: CommunityPatch) -> Result<CommunityPatch, ValidationErrors> {
    let mut collector = Collector::default();
    let name = patch
        .name
        .map(|raw| collector.name(Field::CommunityName, &raw));
    let description = patch
        .description
        .map(|raw| collector.description(raw));
    collector.finish(CommunityPatch {
        name,
        description,
        ..patch
    })
}

/// Validates the add-participant form; both fields are required.
pub fn validate_new_participant(input: NewParticipant) -> Result<NewParticipant, ValidationErrors> {
    let mut collector = Collector::default();
    let name = collector.required(Field::ParticipantName, &input.name);
    let phone = collector.required(Field::ParticipantPhone, &input.phone);
    collector.finish(NewParticipant { name, phone })
}
