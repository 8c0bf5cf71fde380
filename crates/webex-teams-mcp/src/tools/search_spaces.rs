//! `search_spaces` tool: find spaces whose title contains a query.

use serde::Deserialize;
use serde_json::{Map, Value};

use webex_teams::WebexApi;

use crate::types::McpResult;

use super::format::{bullet_list, plural, room_line};
use super::schema::{parse_params, ParamSpec, ToolSpec};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchParams {
    query: String,
    max: u32,
}

pub fn spec() -> ToolSpec {
    ToolSpec {
        name: "search_spaces",
        description: "Search Webex spaces by title. Case-insensitive substring match \
                      over every space the caller belongs to.",
        params: vec![
            ParamSpec::string("query", "Text to look for in space titles")
                .required()
                .non_empty(),
            ParamSpec::integer("max", "Maximum number of matches to return")
                .default_value(20)
                .range(1, 1000),
        ],
    }
}

pub async fn execute(args: Map<String, Value>, api: &dyn WebexApi) -> McpResult<String> {
    let params: SearchParams = parse_params(args)?;
    let query = params.query.trim();

    let mut rooms = api.search_rooms(query).await?;
    let total = rooms.len();
    rooms.truncate(params.max as usize);

    let found = plural(total, "space", "spaces");
    let heading = if total > rooms.len() {
        format!(
            "Found {found} matching \"{query}\" (showing first {}):",
            rooms.len()
        )
    } else {
        format!("Found {found} matching \"{query}\":")
    };

    Ok(bullet_list(heading, rooms.iter().map(room_line)))
}
