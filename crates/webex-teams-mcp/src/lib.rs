//! Webex Teams MCP server: messaging, spaces, memberships, and people as MCP tools.

pub mod config;
pub mod protocol;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::{ConfigError, ServerConfig};
pub use protocol::ProtocolHandler;
pub use tools::{ToolName, ToolRegistry};
pub use transport::StdioTransport;
