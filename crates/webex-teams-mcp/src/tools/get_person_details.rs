//! `get_person_details` tool: look up a person by id or email.

use serde::Deserialize;
use serde_json::{Map, Value};

use webex_teams::{PersonRef, WebexApi};

use crate::types::{McpError, McpResult};

use super::format::person_details;
use super::schema::{parse_params, require_exactly_one, ParamSpec, ToolSpec};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersonParams {
    #[serde(default)]
    person_id: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

pub fn spec() -> ToolSpec {
    ToolSpec {
        name: "get_person_details",
        description: "Get details about a person by person ID or email. \
                      Use personId \"me\" for the authenticated user or bot.",
        params: vec![
            ParamSpec::string("personId", "Person ID, or \"me\"").non_empty(),
            ParamSpec::string("email", "Email address of the person").non_empty(),
        ],
    }
}

pub async fn execute(args: Map<String, Value>, api: &dyn WebexApi) -> McpResult<String> {
    let params: PersonParams = parse_params(args)?;
    require_exactly_one(&[
        ("personId", params.person_id.is_some()),
        ("email", params.email.is_some()),
    ])?;

    let person = match params.person_id {
        Some(id) => api.get_person(&PersonRef::parse(id.trim())).await?,
        None => {
            let email = params.email.unwrap_or_default();
            api.find_people_by_email(email.trim())
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| McpError::InvalidParams(format!("no person with email {email}")))?
        }
    };

    Ok(person_details("Person details:", &person))
}
