//! `get_my_details` tool: identity of the authenticated user or bot.

use serde_json::{Map, Value};

use webex_teams::{PersonRef, WebexApi};

use crate::types::McpResult;

use super::format::person_details;
use super::schema::ToolSpec;

pub fn spec() -> ToolSpec {
    ToolSpec {
        name: "get_my_details",
        description: "Get the authenticated user or bot: name, emails, organization, and type.",
        params: Vec::new(),
    }
}

pub async fn execute(_args: Map<String, Value>, api: &dyn WebexApi) -> McpResult<String> {
    let me = api.get_person(&PersonRef::Me).await?;
    Ok(person_details("Authenticated as:", &me))
}
