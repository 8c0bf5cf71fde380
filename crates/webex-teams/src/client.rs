//! The `WebexApi` seam and its reqwest-backed implementation.
//!
//! One method per REST resource family. No retries: a failed call surfaces
//! as a [`WebexError`] exactly once.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, LINK};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::search::filter_rooms_by_title;
use crate::types::*;

/// Production API root.
pub const DEFAULT_API_BASE: &str = "https://webexapis.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Largest page size `GET /rooms` accepts.
pub const ROOM_PAGE_SIZE: u32 = 1000;
/// Upper bound on pages followed when listing every room.
pub const MAX_ROOM_PAGES: usize = 10;

/// Remote operations exposed by the Webex service.
#[async_trait]
pub trait WebexApi: Send + Sync {
    async fn send_message(&self, message: &NewMessage) -> WebexResult<Message>;
    async fn list_messages(&self, query: &MessageQuery) -> WebexResult<Vec<Message>>;
    async fn delete_message(&self, message_id: &str) -> WebexResult<()>;

    async fn list_rooms(&self, query: &RoomQuery) -> WebexResult<Vec<Room>>;
    async fn get_room(&self, room_id: &str) -> WebexResult<Room>;
    async fn create_room(&self, room: &NewRoom) -> WebexResult<Room>;

    async fn add_membership(&self, membership: &NewMembership) -> WebexResult<Membership>;
    async fn list_memberships(&self, room_id: &str, max: Option<u32>)
        -> WebexResult<Vec<Membership>>;

    async fn get_person(&self, person: &PersonRef) -> WebexResult<Person>;
    async fn find_people_by_email(&self, email: &str) -> WebexResult<Vec<Person>>;

    /// Every room visible to the caller.
    async fn list_all_rooms(&self) -> WebexResult<Vec<Room>> {
        self.list_rooms(&RoomQuery {
            max: Some(ROOM_PAGE_SIZE),
            ..RoomQuery::default()
        })
        .await
    }

    /// Case-insensitive title search over the full room list.
    async fn search_rooms(&self, query: &str) -> WebexResult<Vec<Room>> {
        let rooms = self.list_all_rooms().await?;
        Ok(filter_rooms_by_title(rooms, query))
    }
}

/// Error body returned by the Webex API on failures.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    tracking_id: Option<String>,
}

/// HTTP client for the Webex REST API.
///
/// Holds one keep-alive connection pool and the bearer credential. Cheap to
/// share behind an `Arc`.
#[derive(Clone)]
pub struct WebexClient {
    http: reqwest::Client,
    base: Url,
    token: String,
}

impl std::fmt::Debug for WebexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebexClient")
            .field("base", &self.base.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

impl WebexClient {
    /// Create a client against the production API with default timeout.
    pub fn new(token: impl Into<String>) -> WebexResult<Self> {
        Self::with_options(
            token,
            DEFAULT_API_BASE,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a client with an explicit API root and per-request timeout.
    pub fn with_options(
        token: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> WebexResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(WebexError::Config("access token is empty".to_string()));
        }

        let mut base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(WebexError::Config(format!(
                "API base is not a hierarchical URL: {base_url}"
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("webex-teams/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base,
            token: token.trim().to_string(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build an endpoint URL, percent-encoding each path segment.
    fn endpoint(&self, segments: &[&str]) -> WebexResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| WebexError::Config(format!("bad API base: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url).bearer_auth(&self.token)
    }

    /// Send a request and turn non-2xx responses into [`WebexError::Api`].
    async fn execute(&self, builder: RequestBuilder) -> WebexResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(
            "{} {} -> {}",
            response.url().path(),
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        );

        if status.is_success() {
            return Ok(response);
        }

        Err(api_error(response).await)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> WebexResult<T> {
        let response = self.execute(builder).await?;
        decode(response).await
    }

    /// Fetch one page of a list endpoint, returning the `rel="next"` link.
    async fn fetch_page<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> WebexResult<(Vec<T>, Option<Url>)> {
        let response = self.execute(self.request(Method::GET, url)).await?;
        let next = next_page_url(response.headers());
        let list: ItemList<T> = decode(response).await?;
        Ok((list.items, next))
    }

    async fn list<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        pairs: &[(&str, String)],
    ) -> WebexResult<Vec<T>> {
        let mut url = self.endpoint(segments)?;
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        let (items, _) = self.fetch_page(url).await?;
        Ok(items)
    }
}

#[async_trait]
impl WebexApi for WebexClient {
    async fn send_message(&self, message: &NewMessage) -> WebexResult<Message> {
        let url = self.endpoint(&["messages"])?;
        self.fetch(self.request(Method::POST, url).json(message))
            .await
    }

    async fn list_messages(&self, query: &MessageQuery) -> WebexResult<Vec<Message>> {
        self.list(&["messages"], &query.to_pairs()).await
    }

    async fn delete_message(&self, message_id: &str) -> WebexResult<()> {
        let url = self.endpoint(&["messages", message_id])?;
        self.execute(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    async fn list_rooms(&self, query: &RoomQuery) -> WebexResult<Vec<Room>> {
        self.list(&["rooms"], &query.to_pairs()).await
    }

    async fn get_room(&self, room_id: &str) -> WebexResult<Room> {
        let url = self.endpoint(&["rooms", room_id])?;
        self.fetch(self.request(Method::GET, url)).await
    }

    async fn create_room(&self, room: &NewRoom) -> WebexResult<Room> {
        let url = self.endpoint(&["rooms"])?;
        self.fetch(self.request(Method::POST, url).json(room)).await
    }

    async fn add_membership(&self, membership: &NewMembership) -> WebexResult<Membership> {
        let url = self.endpoint(&["memberships"])?;
        self.fetch(self.request(Method::POST, url).json(membership))
            .await
    }

    async fn list_memberships(
        &self,
        room_id: &str,
        max: Option<u32>,
    ) -> WebexResult<Vec<Membership>> {
        let mut pairs = vec![("roomId", room_id.to_string())];
        if let Some(max) = max {
            pairs.push(("max", max.to_string()));
        }
        self.list(&["memberships"], &pairs).await
    }

    async fn get_person(&self, person: &PersonRef) -> WebexResult<Person> {
        let url = self.endpoint(&["people", person.path_segment()])?;
        self.fetch(self.request(Method::GET, url)).await
    }

    async fn find_people_by_email(&self, email: &str) -> WebexResult<Vec<Person>> {
        self.list(&["people"], &[("email", email.to_string())])
            .await
    }

    async fn list_all_rooms(&self) -> WebexResult<Vec<Room>> {
        let mut url = self.endpoint(&["rooms"])?;
        url.query_pairs_mut()
            .append_pair("max", &ROOM_PAGE_SIZE.to_string());

        let mut rooms = Vec::new();
        for page in 0..MAX_ROOM_PAGES {
            let (items, next) = self.fetch_page::<Room>(url).await?;
            rooms.extend(items);
            match next {
                Some(next_url) if next_url.origin() == self.base.origin() => url = next_url,
                Some(next_url) => {
                    tracing::warn!(
                        "Not following room page link to foreign origin {}",
                        next_url.origin().ascii_serialization()
                    );
                    return Ok(rooms);
                }
                None => return Ok(rooms),
            }
            if page + 1 == MAX_ROOM_PAGES {
                tracing::warn!(
                    "Stopped listing rooms after {MAX_ROOM_PAGES} pages ({} rooms)",
                    rooms.len()
                );
            }
        }
        Ok(rooms)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> WebexResult<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| WebexError::Decode(e.to_string()))
}

async fn api_error(response: Response) -> WebexError {
    let status = response.status();
    let header_tracking_id = response
        .headers()
        .get("trackingid")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.text().await.unwrap_or_default();

    let parsed = serde_json::from_str::<ApiErrorBody>(&body).ok();
    let tracking_id = parsed
        .as_ref()
        .and_then(|b| b.tracking_id.clone())
        .or(header_tracking_id);
    let message = parsed
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    tracing::warn!("Webex API returned {}: {message}", status.as_u16());

    WebexError::Api {
        status: status.as_u16(),
        message,
        tracking_id,
    }
}

/// Extract the `rel="next"` target from a `Link` header.
pub fn next_page_url(headers: &HeaderMap) -> Option<Url> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(parse_next_link)
        .and_then(|link| Url::parse(&link).ok())
}

fn parse_next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|p| {
            let p = p.trim();
            p == "rel=\"next\"" || p == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_next_link() {
        let header = r#"<https://webexapis.com/v1/rooms?max=2&cursor=abc>; rel="next""#;
        assert_eq!(
            parse_next_link(header).as_deref(),
            Some("https://webexapis.com/v1/rooms?max=2&cursor=abc")
        );
    }

    #[test]
    fn test_parse_next_link_among_others() {
        let header = r#"<https://x/prev>; rel="prev", <https://x/next>; rel="next""#;
        assert_eq!(parse_next_link(header).as_deref(), Some("https://x/next"));
    }

    #[test]
    fn test_parse_next_link_absent() {
        assert_eq!(parse_next_link(r#"<https://x/first>; rel="first""#), None);
        assert_eq!(parse_next_link(""), None);
    }

    #[test]
    fn test_empty_token_rejected() {
        let err = WebexClient::new("   ").unwrap_err();
        assert!(matches!(err, WebexError::Config(_)));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client =
            WebexClient::with_options("t", "http://localhost:9/v1", Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:9/v1/");
        let url = client.endpoint(&["rooms", "a/b"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9/v1/rooms/a%2Fb");
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = WebexClient::new("secret-token").unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("secret-token"));
    }
}
