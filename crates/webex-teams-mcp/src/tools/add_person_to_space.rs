//! `add_person_to_space` tool: create a membership.

use serde::Deserialize;
use serde_json::{Map, Value};

use webex_teams::{NewMembership, WebexApi};

use crate::types::McpResult;

use super::format::{DetailBlock, NONE};
use super::schema::{parse_params, require_exactly_one, ParamSpec, ToolSpec};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddParams {
    space_id: String,
    #[serde(default)]
    person_email: Option<String>,
    #[serde(default)]
    person_id: Option<String>,
    is_moderator: bool,
}

pub fn spec() -> ToolSpec {
    ToolSpec {
        name: "add_person_to_space",
        description: "Add a person to a Webex space by email or person ID, \
                      optionally as a moderator.",
        params: vec![
            ParamSpec::string("spaceId", "ID of the space")
                .required()
                .non_empty(),
            ParamSpec::string("personEmail", "Email of the person to add").non_empty(),
            ParamSpec::string("personId", "ID of the person to add").non_empty(),
            ParamSpec::boolean("isModerator", "Make the person a moderator").default_value(false),
        ],
    }
}

pub async fn execute(args: Map<String, Value>, api: &dyn WebexApi) -> McpResult<String> {
    let params: AddParams = parse_params(args)?;
    require_exactly_one(&[
        ("personEmail", params.person_email.is_some()),
        ("personId", params.person_id.is_some()),
    ])?;

    let membership = api
        .add_membership(&NewMembership {
            room_id: params.space_id,
            person_id: params.person_id,
            person_email: params.person_email,
            is_moderator: params.is_moderator,
        })
        .await?;

    Ok(DetailBlock::new("Person added to space.")
        .row("membership id", &membership.id)
        .row("space id", membership.room_id.as_deref().unwrap_or(NONE))
        .opt_row("person email", membership.person_email.as_deref())
        .opt_row("person id", membership.person_id.as_deref())
        .row("moderator", membership.is_moderator.to_string())
        .render())
}
