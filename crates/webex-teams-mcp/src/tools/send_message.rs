//! `send_message` tool: post a message to a space or directly to a person.

use serde::Deserialize;
use serde_json::{Map, Value};

use webex_teams::{NewMessage, WebexApi};

use crate::types::McpResult;

use super::format::{timestamp, DetailBlock};
use super::resolve;
use super::schema::{parse_params, require_exactly_one, ParamSpec, ToolSpec};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendParams {
    #[serde(default)]
    space_id: Option<String>,
    #[serde(default)]
    space_title: Option<String>,
    #[serde(default)]
    to_person_email: Option<String>,
    #[serde(default)]
    to_person_id: Option<String>,
    text: String,
    #[serde(default)]
    markdown: Option<String>,
    #[serde(default)]
    parent_id: Option<String>,
}

pub fn spec() -> ToolSpec {
    ToolSpec {
        name: "send_message",
        description: "Send a message to a Webex space, or directly to a person by email or id. \
                      Give exactly one destination.",
        params: vec![
            ParamSpec::string("spaceId", "ID of the space to post in").non_empty(),
            ParamSpec::string(
                "spaceTitle",
                "Title of the space to post in; must identify exactly one space",
            )
            .non_empty(),
            ParamSpec::string("toPersonEmail", "Email of a person to message 1:1").non_empty(),
            ParamSpec::string("toPersonId", "ID of a person to message 1:1").non_empty(),
            ParamSpec::string("text", "Plain-text message body").required().non_empty(),
            ParamSpec::string(
                "markdown",
                "Optional Markdown body; clients that render Markdown show it instead of text",
            ),
            ParamSpec::string("parentId", "Optional ID of a message to reply to in a thread"),
        ],
    }
}

pub async fn execute(args: Map<String, Value>, api: &dyn WebexApi) -> McpResult<String> {
    let params: SendParams = parse_params(args)?;
    require_exactly_one(&[
        ("spaceId", params.space_id.is_some()),
        ("spaceTitle", params.space_title.is_some()),
        ("toPersonEmail", params.to_person_email.is_some()),
        ("toPersonId", params.to_person_id.is_some()),
    ])?;

    let room_id = if params.space_id.is_some() || params.space_title.is_some() {
        Some(resolve::space_id(api, params.space_id, params.space_title).await?)
    } else {
        None
    };

    let message = api
        .send_message(&NewMessage {
            room_id,
            to_person_id: params.to_person_id,
            to_person_email: params.to_person_email,
            parent_id: params.parent_id,
            text: Some(params.text),
            markdown: params.markdown.filter(|m| !m.trim().is_empty()),
        })
        .await?;

    Ok(DetailBlock::new("Message sent.")
        .row("message id", &message.id)
        .opt_row("space id", message.room_id.as_deref())
        .opt_row("to", message.to_person_email.as_deref())
        .opt_row("parent id", message.parent_id.as_deref())
        .row("created", timestamp(message.created.as_ref()))
        .render())
}
