//! `list_spaces` tool: list spaces the caller belongs to.

use serde::Deserialize;
use serde_json::{Map, Value};

use webex_teams::{RoomQuery, RoomSort, RoomType, WebexApi};

use crate::types::McpResult;

use super::format::{bullet_list, plural, room_line};
use super::schema::{parse_params, ParamSpec, ToolSpec};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListParams {
    max: u32,
    #[serde(default, rename = "type")]
    space_type: Option<String>,
    #[serde(default)]
    sort_by: Option<String>,
}

pub fn spec() -> ToolSpec {
    ToolSpec {
        name: "list_spaces",
        description: "List Webex spaces the authenticated user or bot belongs to, \
                      with id, title, type, and activity dates.",
        params: vec![
            ParamSpec::integer("max", "Maximum number of spaces to return")
                .default_value(50)
                .range(1, 1000),
            ParamSpec::string("type", "Only spaces of this type").one_of(&["direct", "group"]),
            ParamSpec::string("sortBy", "Sort order").one_of(&["id", "lastactivity", "created"]),
        ],
    }
}

pub async fn execute(args: Map<String, Value>, api: &dyn WebexApi) -> McpResult<String> {
    let params: ListParams = parse_params(args)?;

    let query = RoomQuery {
        room_type: params.space_type.as_deref().and_then(RoomType::parse),
        sort_by: params.sort_by.as_deref().and_then(RoomSort::parse),
        team_id: None,
        max: Some(params.max),
    };
    let rooms = api.list_rooms(&query).await?;

    Ok(bullet_list(
        format!("Found {}:", plural(rooms.len(), "space", "spaces")),
        rooms.iter().map(room_line),
    ))
}
