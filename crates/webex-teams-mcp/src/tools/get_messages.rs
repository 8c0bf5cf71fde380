//! `get_messages` tool: read recent messages from a space.

use serde::Deserialize;
use serde_json::{Map, Value};

use webex_teams::{MessageQuery, WebexApi};

use crate::types::McpResult;

use super::format::{bullet_list, message_line, plural};
use super::resolve;
use super::schema::{parse_params, require_exactly_one, ParamSpec, ToolSpec};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessagesParams {
    #[serde(default)]
    space_id: Option<String>,
    #[serde(default)]
    space_title: Option<String>,
    max: u32,
    #[serde(default)]
    before: Option<String>,
}

pub fn spec() -> ToolSpec {
    ToolSpec {
        name: "get_messages",
        description: "Retrieve recent messages from a Webex space, newest first, \
                      with sender, time, and message id. Page back with `before`.",
        params: vec![
            ParamSpec::string("spaceId", "ID of the space").non_empty(),
            ParamSpec::string(
                "spaceTitle",
                "Title of the space; must identify exactly one space",
            )
            .non_empty(),
            ParamSpec::integer("max", "Maximum number of messages to return")
                .default_value(20)
                .range(1, 1000),
            ParamSpec::string(
                "before",
                "Only messages older than this message ID (for pagination)",
            )
            .non_empty(),
        ],
    }
}

pub async fn execute(args: Map<String, Value>, api: &dyn WebexApi) -> McpResult<String> {
    let params: MessagesParams = parse_params(args)?;
    require_exactly_one(&[
        ("spaceId", params.space_id.is_some()),
        ("spaceTitle", params.space_title.is_some()),
    ])?;

    let room_id = resolve::space_id(api, params.space_id, params.space_title).await?;
    let messages = api
        .list_messages(&MessageQuery {
            room_id: room_id.clone(),
            max: Some(params.max),
            before_message: params.before,
        })
        .await?;

    Ok(bullet_list(
        format!(
            "Retrieved {} from space {room_id}:",
            plural(messages.len(), "message", "messages")
        ),
        messages.iter().map(message_line),
    ))
}
