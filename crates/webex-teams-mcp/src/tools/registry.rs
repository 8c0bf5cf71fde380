//! Tool registration and dispatch.

use serde_json::{Map, Value};

use webex_teams::WebexApi;

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::schema::ToolSpec;
use super::{
    add_person_to_space, create_space, delete_message, get_messages, get_my_details,
    get_person_details, get_space_details, list_space_members, list_spaces, search_spaces,
    send_message,
};

/// Every tool the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    SendMessage,
    ListSpaces,
    GetSpaceDetails,
    GetMessages,
    CreateSpace,
    AddPersonToSpace,
    ListSpaceMembers,
    GetPersonDetails,
    DeleteMessage,
    SearchSpaces,
    GetMyDetails,
}

impl ToolName {
    /// Declaration order; `tools/list` follows it.
    pub const ALL: [ToolName; 11] = [
        ToolName::SendMessage,
        ToolName::ListSpaces,
        ToolName::GetSpaceDetails,
        ToolName::GetMessages,
        ToolName::CreateSpace,
        ToolName::AddPersonToSpace,
        ToolName::ListSpaceMembers,
        ToolName::GetPersonDetails,
        ToolName::DeleteMessage,
        ToolName::SearchSpaces,
        ToolName::GetMyDetails,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::SendMessage => "send_message",
            ToolName::ListSpaces => "list_spaces",
            ToolName::GetSpaceDetails => "get_space_details",
            ToolName::GetMessages => "get_messages",
            ToolName::CreateSpace => "create_space",
            ToolName::AddPersonToSpace => "add_person_to_space",
            ToolName::ListSpaceMembers => "list_space_members",
            ToolName::GetPersonDetails => "get_person_details",
            ToolName::DeleteMessage => "delete_message",
            ToolName::SearchSpaces => "search_spaces",
            ToolName::GetMyDetails => "get_my_details",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }

    pub fn spec(self) -> ToolSpec {
        match self {
            ToolName::SendMessage => send_message::spec(),
            ToolName::ListSpaces => list_spaces::spec(),
            ToolName::GetSpaceDetails => get_space_details::spec(),
            ToolName::GetMessages => get_messages::spec(),
            ToolName::CreateSpace => create_space::spec(),
            ToolName::AddPersonToSpace => add_person_to_space::spec(),
            ToolName::ListSpaceMembers => list_space_members::spec(),
            ToolName::GetPersonDetails => get_person_details::spec(),
            ToolName::DeleteMessage => delete_message::spec(),
            ToolName::SearchSpaces => search_spaces::spec(),
            ToolName::GetMyDetails => get_my_details::spec(),
        }
    }

    async fn execute(self, args: Map<String, Value>, api: &dyn WebexApi) -> McpResult<String> {
        match self {
            ToolName::SendMessage => send_message::execute(args, api).await,
            ToolName::ListSpaces => list_spaces::execute(args, api).await,
            ToolName::GetSpaceDetails => get_space_details::execute(args, api).await,
            ToolName::GetMessages => get_messages::execute(args, api).await,
            ToolName::CreateSpace => create_space::execute(args, api).await,
            ToolName::AddPersonToSpace => add_person_to_space::execute(args, api).await,
            ToolName::ListSpaceMembers => list_space_members::execute(args, api).await,
            ToolName::GetPersonDetails => get_person_details::execute(args, api).await,
            ToolName::DeleteMessage => delete_message::execute(args, api).await,
            ToolName::SearchSpaces => search_spaces::execute(args, api).await,
            ToolName::GetMyDetails => get_my_details::execute(args, api).await,
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ToolRegistry;

impl ToolRegistry {
    pub fn list_tools() -> Vec<ToolDefinition> {
        ToolName::ALL
            .iter()
            .map(|tool| tool.spec().definition())
            .collect()
    }

    /// Run one tool call. Every failure, including an unknown tool name,
    /// comes back as an `isError` result rather than an `Err`.
    pub async fn call(
        name: &str,
        arguments: Option<Value>,
        api: &dyn WebexApi,
    ) -> ToolCallResult {
        let Some(tool) = ToolName::from_name(name) else {
            tracing::warn!("Call to unknown tool: {name}");
            return ToolCallResult::error(McpError::ToolNotFound(name.to_string()).to_string());
        };

        tracing::debug!("Calling tool {tool}");
        match Self::dispatch(tool, arguments, api).await {
            Ok(text) => ToolCallResult::text(text),
            Err(e) => {
                tracing::warn!("Tool {tool} failed: {e}");
                ToolCallResult::error(e.to_string())
            }
        }
    }

    async fn dispatch(
        tool: ToolName,
        arguments: Option<Value>,
        api: &dyn WebexApi,
    ) -> McpResult<String> {
        let args = tool.spec().validate(arguments)?;
        tool.execute(args, api).await
    }
}
