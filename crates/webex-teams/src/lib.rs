//! Typed async client for Webex Teams rooms, messages, memberships, and people.

pub mod client;
pub mod search;
pub mod types;

pub use client::{WebexApi, WebexClient, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};
pub use search::{filter_rooms_by_title, resolve_room_title, TitleMatch};
pub use types::*;
