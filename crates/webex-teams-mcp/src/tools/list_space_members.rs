//! `list_space_members` tool: list memberships of a space.

use serde::Deserialize;
use serde_json::{Map, Value};

use webex_teams::WebexApi;

use crate::types::McpResult;

use super::format::{bullet_list, member_line, plural};
use super::schema::{parse_params, ParamSpec, ToolSpec};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MembersParams {
    space_id: String,
    max: u32,
}

pub fn spec() -> ToolSpec {
    ToolSpec {
        name: "list_space_members",
        description: "List the members of a Webex space with names, emails, and moderator status.",
        params: vec![
            ParamSpec::string("spaceId", "ID of the space")
                .required()
                .non_empty(),
            ParamSpec::integer("max", "Maximum number of members to return")
                .default_value(100)
                .range(1, 1000),
        ],
    }
}

pub async fn execute(args: Map<String, Value>, api: &dyn WebexApi) -> McpResult<String> {
    let params: MembersParams = parse_params(args)?;
    let members = api
        .list_memberships(&params.space_id, Some(params.max))
        .await?;

    Ok(bullet_list(
        format!(
            "Found {} in space {}:",
            plural(members.len(), "member", "members"),
            params.space_id
        ),
        members.iter().map(member_line),
    ))
}
