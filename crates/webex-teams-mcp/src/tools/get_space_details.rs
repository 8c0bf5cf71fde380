//! `get_space_details` tool: fetch one space by id.

use serde::Deserialize;
use serde_json::{Map, Value};

use webex_teams::WebexApi;

use crate::types::McpResult;

use super::format::room_details;
use super::schema::{parse_params, ParamSpec, ToolSpec};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetailsParams {
    space_id: String,
}

pub fn spec() -> ToolSpec {
    ToolSpec {
        name: "get_space_details",
        description: "Get details of a Webex space: title, type, lock state, team, creator, and dates.",
        params: vec![ParamSpec::string("spaceId", "ID of the space")
            .required()
            .non_empty()],
    }
}

pub async fn execute(args: Map<String, Value>, api: &dyn WebexApi) -> McpResult<String> {
    let params: DetailsParams = parse_params(args)?;
    let room = api.get_room(&params.space_id).await?;
    Ok(room_details("Space details:", &room))
}
