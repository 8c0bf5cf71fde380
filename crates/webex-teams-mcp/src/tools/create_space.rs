//! `create_space` tool: create a new group space.

use serde::Deserialize;
use serde_json::{Map, Value};

use webex_teams::{NewRoom, WebexApi};

use crate::types::McpResult;

use super::format::room_details;
use super::schema::{parse_params, ParamSpec, ToolSpec};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateParams {
    title: String,
    #[serde(default)]
    team_id: Option<String>,
}

pub fn spec() -> ToolSpec {
    ToolSpec {
        name: "create_space",
        description: "Create a new Webex space, optionally inside a team. \
                      The caller becomes its first member.",
        params: vec![
            ParamSpec::string("title", "Title of the new space")
                .required()
                .non_empty(),
            ParamSpec::string("teamId", "Optional ID of the team to create the space in"),
        ],
    }
}

pub async fn execute(args: Map<String, Value>, api: &dyn WebexApi) -> McpResult<String> {
    let params: CreateParams = parse_params(args)?;
    let room = api
        .create_room(&NewRoom {
            title: params.title.trim().to_string(),
            team_id: params.team_id,
        })
        .await?;
    Ok(room_details("Space created.", &room))
}
