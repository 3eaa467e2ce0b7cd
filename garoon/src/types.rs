// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Wire-level payload types for the schedule API.
//!
//! Request types serialize with camelCase keys and omit unset optional
//! fields entirely; response types tolerate missing fields so partial
//! server answers still decode.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

/// Record identifier.
///
/// Garoon accepts numeric identifiers in requests but returns them as
/// strings, so both forms are representable. Either way the identifier is
/// interpolated into URL paths unchanged.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// Numeric form, the usual shape in requests.
    Num(u64),
    /// String form, the shape the API answers with.
    Str(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => n.fmt(f),
            Self::Str(s) => s.fmt(f),
        }
    }
}

impl From<u64> for Id {
    fn from(id: u64) -> Self {
        Self::Num(id)
    }
}

impl From<String> for Id {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

/// A point in time with its IANA time zone.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    /// RFC 3339 date-time.
    pub date_time: String,
    /// IANA time zone name (e.g. `Asia/Tokyo`).
    pub time_zone: String,
}

impl EventDateTime {
    /// Creates a new `EventDateTime`.
    #[must_use]
    pub fn new(date_time: impl Into<String>, time_zone: impl Into<String>) -> Self {
        Self {
            date_time: date_time.into(),
            time_zone: time_zone.into(),
        }
    }
}

/// Kind of a schedule member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberType {
    /// A user.
    User,
    /// An organization.
    Organization,
    /// A role.
    Role,
}

/// An event attendee or watcher.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Member {
    /// Member kind.
    #[serde(rename = "type")]
    pub kind: MemberType,
    /// Member identifier.
    pub id: Id,
    /// Member code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Member {
    /// Creates a member of the given kind.
    #[must_use]
    pub fn new(kind: MemberType, id: impl Into<Id>) -> Self {
        Self {
            kind,
            id: id.into(),
            code: None,
            name: None,
        }
    }

    /// Creates a user member.
    #[must_use]
    pub fn user(id: impl Into<Id>) -> Self {
        Self::new(MemberType::User, id)
    }

    /// Creates an organization member.
    #[must_use]
    pub fn organization(id: impl Into<Id>) -> Self {
        Self::new(MemberType::Organization, id)
    }
}

/// Reference to a facility by identifier, as used in event payloads.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FacilityRef {
    /// Facility identifier.
    pub id: Id,
}

impl FacilityRef {
    /// Creates a facility reference.
    #[must_use]
    pub fn new(id: impl Into<Id>) -> Self {
        Self { id: id.into() }
    }
}

/// A user reference in a response (creator, updater).
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct User {
    /// User identifier.
    pub id: Option<String>,
    /// User code.
    pub code: Option<String>,
    /// Display name.
    pub name: Option<String>,
}

/// Type of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// A regular event.
    Regular,
    /// A recurring event.
    Repeating,
    /// An all-day event.
    AllDay,
}

/// Who may see an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisibilityType {
    /// Visible to everyone.
    Public,
    /// Visible to attendees only.
    Private,
    /// Visible to attendees and watchers.
    SetPrivateWatchers,
}

/// Business-trip company information attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyInfo {
    /// Company name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    /// Address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Route description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Route time in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_time: Option<String>,
    /// Route fare.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_fare: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// An event attachment.
///
/// Uploads carry `name` and base64 `content`; responses carry `id`, `name`
/// and `size`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Attachment {
    /// File name.
    pub name: String,
    /// Base64-encoded file content (requests only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Attachment identifier (responses only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// File size in bytes, as reported by the server (responses only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl Attachment {
    /// Creates an upload attachment from raw bytes, base64-encoding them.
    #[must_use]
    pub fn from_bytes(name: impl Into<String>, content: &[u8]) -> Self {
        Self {
            name: name.into(),
            content: Some(STANDARD.encode(content)),
            id: None,
            size: None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Sort specification for list operations.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrderBy {
    /// Property to sort by (e.g. `createdAt`).
    pub property: String,
    /// Sort direction.
    pub order: Order,
}

impl OrderBy {
    /// Creates a sort specification.
    #[must_use]
    pub fn new(property: impl Into<String>, order: Order) -> Self {
        Self {
            property: property.into(),
            order,
        }
    }
}

/// Kind of target to narrow an event listing to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// A user's events.
    User,
    /// An organization's events.
    Organization,
    /// A facility's events.
    Facility,
}

impl TargetType {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Organization => "organization",
            Self::Facility => "facility",
        }
    }
}

/// An inclusive time range.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeRange {
    /// Range start, RFC 3339.
    pub start: String,
    /// Range end, RFC 3339.
    pub end: String,
}

/// How multiple requested facilities combine in an availability search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FacilitySearchCondition {
    /// All facilities must be free.
    And,
    /// Any facility may be free.
    Or,
}

/// A free time slot found by an availability search.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AvailableTime {
    /// Slot start.
    pub start: Option<EventDateTime>,
    /// Slot end.
    pub end: Option<EventDateTime>,
    /// The facility free during this slot, when facilities were searched.
    pub facility: Option<Facility>,
}

/// A facility.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Facility {
    /// Facility identifier.
    pub id: Option<String>,
    /// Facility name.
    pub name: Option<String>,
    /// Facility code.
    pub code: Option<String>,
}

/// A facility group.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FacilityGroup {
    /// Group identifier.
    pub id: Option<String>,
    /// Group name.
    pub name: Option<String>,
    /// Group code.
    pub code: Option<String>,
    /// Parent group identifier, when nested.
    pub parent_facility_group: Option<String>,
    /// Child group identifiers.
    pub child_facility_groups: Vec<String>,
}

/// A schedule event, as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Event {
    /// Event identifier.
    pub id: Option<String>,
    /// Event type.
    pub event_type: Option<EventType>,
    /// Event menu label.
    pub event_menu: Option<String>,
    /// Subject.
    pub subject: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// Visibility.
    pub visibility_type: Option<VisibilityType>,
    /// Whether attendance check is enabled.
    pub use_attendance_check: Option<bool>,
    /// Whether the event spans whole days.
    pub is_all_day: Option<bool>,
    /// Whether only the start time is set.
    pub is_start_only: Option<bool>,
    /// Start of the event.
    pub start: Option<EventDateTime>,
    /// End of the event.
    pub end: Option<EventDateTime>,
    /// Attendees.
    pub attendees: Vec<Member>,
    /// Watchers.
    pub watchers: Vec<Member>,
    /// Reserved facilities.
    pub facilities: Vec<Facility>,
    /// Purpose of the facility reservation.
    pub facility_using_purpose: Option<String>,
    /// Business-trip company information.
    pub company_info: Option<CompanyInfo>,
    /// Attachments.
    pub attachments: Vec<Attachment>,
    /// Values of customized event items.
    pub additional_items: Option<Value>,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// The user who created the event.
    pub creator: Option<User>,
    /// Last-update timestamp.
    pub updated_at: Option<String>,
    /// The user who last updated the event.
    pub updater: Option<User>,
}

/// Fields of an event to create or update.
///
/// Unset fields are omitted from the payload entirely, which for updates
/// means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventDraft {
    /// Event type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    /// Event menu label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_menu: Option<String>,
    /// Subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Start of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<EventDateTime>,
    /// End of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<EventDateTime>,
    /// Whether the event spans whole days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_all_day: Option<bool>,
    /// Whether only the start time is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_start_only: Option<bool>,
    /// Attendees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<Member>>,
    /// Facilities to reserve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facilities: Option<Vec<FacilityRef>>,
    /// Purpose of the facility reservation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_using_purpose: Option<String>,
    /// Business-trip company information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_info: Option<CompanyInfo>,
    /// Attachments to upload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    /// Visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility_type: Option<VisibilityType>,
    /// Whether attendance check is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_attendance_check: Option<bool>,
    /// Watchers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watchers: Option<Vec<Member>>,
    /// Values of customized event items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_items: Option<Value>,
}
