//! Core data types for Webex rooms, messages, memberships, and people.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Webex space. The REST API calls these "rooms".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// `group` or `direct`.
    #[serde(rename = "type", default)]
    pub room_type: String,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub creator_id: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
}

/// A message posted to a room or sent 1:1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub person_id: Option<String>,
    #[serde(default)]
    pub person_email: Option<String>,
    #[serde(default)]
    pub to_person_email: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// A person's membership in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: String,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub person_id: Option<String>,
    #[serde(default)]
    pub person_email: Option<String>,
    #[serde(default)]
    pub person_display_name: Option<String>,
    #[serde(default)]
    pub is_moderator: bool,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// A Webex user or bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub nick_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub org_id: Option<String>,
    /// `person` or `bot`.
    #[serde(rename = "type", default)]
    pub person_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// Envelope used by every list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemList<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Room type filter for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomType {
    Direct,
    Group,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Direct => "direct",
            RoomType::Group => "group",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "direct" => Some(RoomType::Direct),
            "group" => Some(RoomType::Group),
            _ => None,
        }
    }
}

/// Sort order for room listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomSort {
    Id,
    LastActivity,
    Created,
}

impl RoomSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomSort::Id => "id",
            RoomSort::LastActivity => "lastactivity",
            RoomSort::Created => "created",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(RoomSort::Id),
            "lastactivity" => Some(RoomSort::LastActivity),
            "created" => Some(RoomSort::Created),
            _ => None,
        }
    }
}

/// Filters for `GET /rooms`.
#[derive(Debug, Clone, Default)]
pub struct RoomQuery {
    pub room_type: Option<RoomType>,
    pub sort_by: Option<RoomSort>,
    pub team_id: Option<String>,
    pub max: Option<u32>,
}

impl RoomQuery {
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(room_type) = self.room_type {
            pairs.push(("type", room_type.as_str().to_string()));
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push(("sortBy", sort_by.as_str().to_string()));
        }
        if let Some(team_id) = &self.team_id {
            pairs.push(("teamId", team_id.clone()));
        }
        if let Some(max) = self.max {
            pairs.push(("max", max.to_string()));
        }
        pairs
    }
}

/// Filters for `GET /messages`.
#[derive(Debug, Clone)]
pub struct MessageQuery {
    pub room_id: String,
    pub max: Option<u32>,
    /// Only messages sent before this message id.
    pub before_message: Option<String>,
}

impl MessageQuery {
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("roomId", self.room_id.clone())];
        if let Some(max) = self.max {
            pairs.push(("max", max.to_string()));
        }
        if let Some(before) = &self.before_message {
            pairs.push(("beforeMessage", before.clone()));
        }
        pairs
    }
}

/// Body of `POST /messages`. Exactly one destination should be set.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_person_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_person_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
}

/// Body of `POST /rooms`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

/// Body of `POST /memberships`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMembership {
    pub room_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_email: Option<String>,
    pub is_moderator: bool,
}

/// Who to look up in `GET /people/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonRef {
    /// The authenticated user or bot.
    Me,
    Id(String),
}

impl PersonRef {
    /// `"me"` (any case) maps to [`PersonRef::Me`].
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("me") {
            PersonRef::Me
        } else {
            PersonRef::Id(value.to_string())
        }
    }

    pub fn path_segment(&self) -> &str {
        match self {
            PersonRef::Me => "me",
            PersonRef::Id(id) => id,
        }
    }
}

/// Errors returned by the Webex client.
#[derive(thiserror::Error, Debug)]
pub enum WebexError {
    #[error("Webex API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        tracking_id: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl WebexError {
    /// HTTP status of an API error, if the failure came from the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            WebexError::Api { status, .. } => Some(*status),
            WebexError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Convenience result type.
pub type WebexResult<T> = Result<T, WebexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_decodes_api_shape() {
        let room: Room = serde_json::from_str(
            r#"{
                "id": "Y2lzY29zcGFyazovL3VzL1JPT00vYmJjZWIxYWQ",
                "title": "Project Unicorn",
                "type": "group",
                "isLocked": true,
                "teamId": "team-1",
                "lastActivity": "2016-04-21T19:12:48.920Z",
                "creatorId": "person-1",
                "created": "2016-04-21T19:01:55.966Z",
                "ownerId": "org-1"
            }"#,
        )
        .unwrap();
        assert_eq!(room.title, "Project Unicorn");
        assert_eq!(room.room_type, "group");
        assert!(room.is_locked);
        assert_eq!(room.team_id.as_deref(), Some("team-1"));
        assert!(room.last_activity.is_some());
    }

    #[test]
    fn test_person_tolerates_missing_fields() {
        let person: Person = serde_json::from_str(r#"{"id": "p1"}"#).unwrap();
        assert!(person.emails.is_empty());
        assert!(person.display_name.is_none());
    }

    #[test]
    fn test_new_message_omits_unset_fields() {
        let body = NewMessage {
            room_id: Some("r1".to_string()),
            text: Some("hi".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, serde_json::json!({ "roomId": "r1", "text": "hi" }));
    }

    #[test]
    fn test_person_ref_me_sentinel() {
        assert_eq!(PersonRef::parse("me"), PersonRef::Me);
        assert_eq!(PersonRef::parse("ME"), PersonRef::Me);
        assert_eq!(PersonRef::parse("abc").path_segment(), "abc");
    }

    #[test]
    fn test_room_query_pairs() {
        let query = RoomQuery {
            room_type: Some(RoomType::Group),
            sort_by: Some(RoomSort::LastActivity),
            team_id: None,
            max: Some(10),
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("type", "group".to_string()),
                ("sortBy", "lastactivity".to_string()),
                ("max", "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_api_error_display_has_status() {
        let err = WebexError::Api {
            status: 401,
            message: "The request requires a valid access token set in the Authorization request header.".to_string(),
            tracking_id: None,
        };
        assert!(err.to_string().contains("401"));
        assert_eq!(err.status(), Some(401));
    }
}
