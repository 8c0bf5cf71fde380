//! MCP tool implementations.

pub mod add_person_to_space;
pub mod create_space;
pub mod delete_message;
pub mod format;
pub mod get_messages;
pub mod get_my_details;
pub mod get_person_details;
pub mod get_space_details;
pub mod list_space_members;
pub mod list_spaces;
pub mod registry;
pub mod resolve;
pub mod schema;
pub mod search_spaces;
pub mod send_message;

pub use registry::{ToolName, ToolRegistry};
pub use schema::{ParamKind, ParamSpec, ToolSpec};
