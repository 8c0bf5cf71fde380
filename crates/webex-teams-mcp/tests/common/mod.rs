//! Shared fixtures for webex-teams-mcp integration tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use webex_teams::{
    Membership, Message, MessageQuery, NewMembership, NewMessage, NewRoom, Person, PersonRef,
    Room, RoomQuery, WebexApi, WebexError, WebexResult,
};

/// How every stubbed call behaves before it returns data.
#[derive(Debug, Clone, Copy, Default)]
pub enum Behavior {
    #[default]
    Ok,
    /// Fail with this HTTP status.
    Fail(u16),
    /// Sleep first, then succeed.
    Delay(Duration),
    /// Never complete.
    Hang,
}

/// In-memory `WebexApi` with canned data.
#[derive(Default)]
pub struct StubApi {
    pub rooms: Vec<Room>,
    pub people: Vec<Person>,
    pub messages: Vec<Message>,
    pub members: Vec<Membership>,
    pub behavior: Behavior,
    pub sent: Mutex<Vec<NewMessage>>,
    pub calls: Mutex<Vec<String>>,
    pub room_queries: Mutex<Vec<RoomQuery>>,
    pub message_queries: Mutex<Vec<MessageQuery>>,
    pub memberships_added: Mutex<Vec<NewMembership>>,
}

impl StubApi {
    /// Three spaces, two people (the first is "me"), two messages, two members.
    pub fn seeded() -> Self {
        Self {
            rooms: vec![
                room("r1", "Engineering Team", "group"),
                room("r2", "Marketing", "group"),
                room("r3", "Design Team", "group"),
            ],
            people: vec![
                person("p-me", "Ada Bot", "ada@example.com", "bot"),
                person("p2", "Grace Hopper", "grace@example.com", "person"),
            ],
            messages: vec![
                message("m1", "r1", "grace@example.com", "Standup in 5"),
                message("m2", "r1", "ada@example.com", "Build is green"),
            ],
            members: vec![
                membership("ms1", "r1", "p-me", "ada@example.com", "Ada Bot", true),
                membership("ms2", "r1", "p2", "grace@example.com", "Grace Hopper", false),
            ],
            ..Self::default()
        }
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_rooms(mut self, rooms: Vec<Room>) -> Self {
        self.rooms = rooms;
        self
    }

    pub fn sent(&self) -> Vec<NewMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn room_queries(&self) -> Vec<RoomQuery> {
        self.room_queries.lock().unwrap().clone()
    }

    pub fn message_queries(&self) -> Vec<MessageQuery> {
        self.message_queries.lock().unwrap().clone()
    }

    pub fn memberships_added(&self) -> Vec<NewMembership> {
        self.memberships_added.lock().unwrap().clone()
    }

    async fn enter(&self, call: &str) -> WebexResult<()> {
        self.calls.lock().unwrap().push(call.to_string());
        match self.behavior {
            Behavior::Ok => Ok(()),
            Behavior::Fail(status) => Err(WebexError::Api {
                status,
                message: "The request requires a valid access token set in the Authorization request header.".to_string(),
                tracking_id: Some("ROUTER_TEST".to_string()),
            }),
            Behavior::Delay(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            Behavior::Hang => std::future::pending().await,
        }
    }
}

fn not_found(what: &str) -> WebexError {
    WebexError::Api {
        status: 404,
        message: format!("{what} not found"),
        tracking_id: None,
    }
}

#[async_trait]
impl WebexApi for StubApi {
    async fn send_message(&self, message: &NewMessage) -> WebexResult<Message> {
        self.enter("send_message").await?;
        self.sent.lock().unwrap().push(message.clone());
        Ok(from_json(json!({
            "id": "m-new",
            "roomId": message.room_id.clone().unwrap_or_else(|| "r-direct".to_string()),
            "toPersonEmail": message.to_person_email,
            "parentId": message.parent_id,
            "text": message.text,
            "created": "2024-05-01T12:00:00.000Z",
        })))
    }

    async fn list_messages(&self, query: &MessageQuery) -> WebexResult<Vec<Message>> {
        self.enter("list_messages").await?;
        self.message_queries.lock().unwrap().push(query.clone());
        let max = query.max.unwrap_or(u32::MAX) as usize;
        Ok(self
            .messages
            .iter()
            .filter(|m| m.room_id.as_deref() == Some(query.room_id.as_str()))
            .take(max)
            .cloned()
            .collect())
    }

    async fn delete_message(&self, message_id: &str) -> WebexResult<()> {
        self.enter("delete_message").await?;
        if self.messages.iter().any(|m| m.id == message_id) {
            Ok(())
        } else {
            Err(not_found("Message"))
        }
    }

    async fn list_rooms(&self, query: &RoomQuery) -> WebexResult<Vec<Room>> {
        self.enter("list_rooms").await?;
        self.room_queries.lock().unwrap().push(query.clone());
        let max = query.max.unwrap_or(u32::MAX) as usize;
        Ok(self
            .rooms
            .iter()
            .filter(|r| {
                query
                    .room_type
                    .map_or(true, |t| r.room_type == t.as_str())
            })
            .take(max)
            .cloned()
            .collect())
    }

    async fn get_room(&self, room_id: &str) -> WebexResult<Room> {
        self.enter("get_room").await?;
        self.rooms
            .iter()
            .find(|r| r.id == room_id)
            .cloned()
            .ok_or_else(|| not_found("Room"))
    }

    async fn create_room(&self, new: &NewRoom) -> WebexResult<Room> {
        self.enter("create_room").await?;
        Ok(room("r-new", &new.title, "group"))
    }

    async fn add_membership(&self, membership: &NewMembership) -> WebexResult<Membership> {
        self.enter("add_membership").await?;
        self.memberships_added.lock().unwrap().push(membership.clone());
        Ok(from_json(json!({
            "id": "ms-new",
            "roomId": membership.room_id,
            "personId": membership.person_id,
            "personEmail": membership.person_email,
            "isModerator": membership.is_moderator,
        })))
    }

    async fn list_memberships(&self, room_id: &str, max: Option<u32>) -> WebexResult<Vec<Membership>> {
        self.enter("list_memberships").await?;
        let max = max.unwrap_or(u32::MAX) as usize;
        Ok(self
            .members
            .iter()
            .filter(|m| m.room_id.as_deref() == Some(room_id))
            .take(max)
            .cloned()
            .collect())
    }

    async fn get_person(&self, person: &PersonRef) -> WebexResult<Person> {
        self.enter("get_person").await?;
        let found = match person {
            PersonRef::Me => self.people.first(),
            PersonRef::Id(id) => self.people.iter().find(|p| &p.id == id),
        };
        found.cloned().ok_or_else(|| not_found("Person"))
    }

    async fn find_people_by_email(&self, email: &str) -> WebexResult<Vec<Person>> {
        self.enter("find_people_by_email").await?;
        Ok(self
            .people
            .iter()
            .filter(|p| p.emails.iter().any(|e| e.eq_ignore_ascii_case(email)))
            .cloned()
            .collect())
    }
}

fn from_json<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("fixture should deserialize")
}

pub fn room(id: &str, title: &str, room_type: &str) -> Room {
    from_json(json!({
        "id": id,
        "title": title,
        "type": room_type,
        "isLocked": false,
        "created": "2024-01-15T09:30:00.000Z",
        "lastActivity": "2024-04-20T16:45:10.000Z",
    }))
}

pub fn person(id: &str, name: &str, email: &str, person_type: &str) -> Person {
    from_json(json!({
        "id": id,
        "displayName": name,
        "emails": [email],
        "orgId": "org-1",
        "type": person_type,
        "created": "2023-11-02T08:00:00.000Z",
    }))
}

pub fn message(id: &str, room_id: &str, from: &str, text: &str) -> Message {
    from_json(json!({
        "id": id,
        "roomId": room_id,
        "roomType": "group",
        "personEmail": from,
        "text": text,
        "created": "2024-04-20T16:45:10.000Z",
    }))
}

pub fn membership(
    id: &str,
    room_id: &str,
    person_id: &str,
    email: &str,
    name: &str,
    moderator: bool,
) -> Membership {
    from_json(json!({
        "id": id,
        "roomId": room_id,
        "personId": person_id,
        "personEmail": email,
        "personDisplayName": name,
        "isModerator": moderator,
        "created": "2024-01-15T09:30:00.000Z",
    }))
}

/// Arguments that pass validation for each tool against [`StubApi::seeded`].
pub fn valid_arguments(tool: &str) -> Value {
    match tool {
        "send_message" => json!({ "spaceId": "r1", "text": "hello" }),
        "list_spaces" => json!({}),
        "get_space_details" => json!({ "spaceId": "r1" }),
        "get_messages" => json!({ "spaceId": "r1" }),
        "create_space" => json!({ "title": "Launch Room" }),
        "add_person_to_space" => json!({ "spaceId": "r1", "personEmail": "new@example.com" }),
        "list_space_members" => json!({ "spaceId": "r1" }),
        "get_person_details" => json!({ "personId": "me" }),
        "delete_message" => json!({ "messageId": "m1" }),
        "search_spaces" => json!({ "query": "Eng" }),
        "get_my_details" => json!({}),
        other => panic!("no fixture arguments for {other}"),
    }
}
