//! Tool parameter schemas and argument validation.
//!
//! Each tool declares its parameters once as [`ParamSpec`]s. The same
//! declaration renders the JSON Schema advertised in `tools/list` and checks
//! incoming arguments before a handler runs.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::types::{McpError, McpResult, ToolDefinition};

/// JSON type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    Boolean,
    Object,
    Array,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Boolean => "boolean",
            ParamKind::Object => "object",
            ParamKind::Array => "array",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Integer => value.is_i64() || value.is_u64(),
            ParamKind::Boolean => value.is_boolean(),
            ParamKind::Object => value.is_object(),
            ParamKind::Array => value.is_array(),
        }
    }
}

/// One declared parameter.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<Value>,
    pub allowed: &'static [&'static str],
    pub non_empty: bool,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
}

impl ParamSpec {
    pub fn new(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
            default: None,
            allowed: &[],
            non_empty: false,
            minimum: None,
            maximum: None,
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::String, description)
    }

    pub fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Integer, description)
    }

    pub fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Boolean, description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = allowed;
        self
    }

    /// Reject strings that are empty or whitespace only.
    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    pub fn range(mut self, minimum: i64, maximum: i64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    fn json_schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".into(), json!(self.kind.as_str()));
        schema.insert("description".into(), json!(self.description));
        if let Some(default) = &self.default {
            schema.insert("default".into(), default.clone());
        }
        if !self.allowed.is_empty() {
            schema.insert("enum".into(), json!(self.allowed));
        }
        if self.non_empty {
            schema.insert("minLength".into(), json!(1));
        }
        if let Some(min) = self.minimum {
            schema.insert("minimum".into(), json!(min));
        }
        if let Some(max) = self.maximum {
            schema.insert("maximum".into(), json!(max));
        }
        Value::Object(schema)
    }

    fn check(&self, value: &Value) -> McpResult<()> {
        if !self.kind.accepts(value) {
            return Err(McpError::InvalidParams(format!(
                "parameter `{}` must be of type {}",
                self.name,
                self.kind.as_str()
            )));
        }

        if let Some(text) = value.as_str() {
            if self.non_empty && text.trim().is_empty() {
                return Err(McpError::InvalidParams(format!(
                    "parameter `{}` must not be empty",
                    self.name
                )));
            }
            if !self.allowed.is_empty() && !self.allowed.contains(&text) {
                return Err(McpError::InvalidParams(format!(
                    "parameter `{}` must be one of: {}",
                    self.name,
                    self.allowed.join(", ")
                )));
            }
        }

        if let Some(n) = value.as_i64() {
            let below = self.minimum.is_some_and(|min| n < min);
            let above = self.maximum.is_some_and(|max| n > max);
            if below || above {
                return Err(McpError::InvalidParams(format!(
                    "parameter `{}` must be between {} and {}",
                    self.name,
                    self.minimum.unwrap_or(i64::MIN),
                    self.maximum.unwrap_or(i64::MAX)
                )));
            }
        } else if value.is_u64() && self.maximum.is_some() {
            return Err(McpError::InvalidParams(format!(
                "parameter `{}` is out of range",
                self.name
            )));
        }

        Ok(())
    }
}

/// A tool's name, description, and parameters.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
}

impl ToolSpec {
    /// Render the MCP tool definition with its JSON Schema.
    pub fn definition(&self) -> ToolDefinition {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.to_string(), p.json_schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });
        if !required.is_empty() {
            schema["required"] = json!(required);
        }

        ToolDefinition {
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            input_schema: schema,
        }
    }

    /// Check arguments against the declared parameters and fill defaults.
    ///
    /// Explicit `null` counts as absent. Undeclared keys pass through untouched.
    pub fn validate(&self, arguments: Option<Value>) -> McpResult<Map<String, Value>> {
        let mut args = match arguments {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(McpError::InvalidParams(
                    "arguments must be a JSON object".to_string(),
                ))
            }
        };

        for param in &self.params {
            if args.get(param.name).is_some_and(Value::is_null) {
                args.remove(param.name);
            }

            match args.get(param.name) {
                Some(value) => param.check(value)?,
                None if param.required => {
                    return Err(McpError::InvalidParams(format!(
                        "missing required parameter `{}`",
                        param.name
                    )));
                }
                None => {
                    if let Some(default) = &param.default {
                        args.insert(param.name.to_string(), default.clone());
                    }
                }
            }
        }

        Ok(args)
    }
}

/// Deserialize validated arguments into a tool's typed parameter struct.
pub fn parse_params<T: DeserializeOwned>(args: Map<String, Value>) -> McpResult<T> {
    serde_json::from_value(Value::Object(args)).map_err(|e| McpError::InvalidParams(e.to_string()))
}

/// Require exactly one of several alternative parameters.
pub fn require_exactly_one(alternatives: &[(&str, bool)]) -> McpResult<()> {
    let present: Vec<&str> = alternatives
        .iter()
        .filter(|(_, set)| *set)
        .map(|(name, _)| *name)
        .collect();
    let names = || {
        alternatives
            .iter()
            .map(|(name, _)| format!("`{name}`"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    match present.len() {
        1 => Ok(()),
        0 => Err(McpError::InvalidParams(format!(
            "one of {} is required",
            names()
        ))),
        _ => Err(McpError::InvalidParams(format!(
            "only one of {} may be given, got {}",
            names(),
            present.join(" and ")
        ))),
    }
}
