//! `delete_message` tool: delete a message by id.

use serde::Deserialize;
use serde_json::{Map, Value};

use webex_teams::WebexApi;

use crate::types::McpResult;

use super::schema::{parse_params, ParamSpec, ToolSpec};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteParams {
    message_id: String,
}

pub fn spec() -> ToolSpec {
    ToolSpec {
        name: "delete_message",
        description: "Delete a message from a Webex space. Only the sender or a moderator may delete.",
        params: vec![ParamSpec::string("messageId", "ID of the message to delete")
            .required()
            .non_empty()],
    }
}

pub async fn execute(args: Map<String, Value>, api: &dyn WebexApi) -> McpResult<String> {
    let params: DeleteParams = parse_params(args)?;
    api.delete_message(&params.message_id).await?;
    Ok(format!("Message {} deleted.", params.message_id))
}
