use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::{ContractCheckSummary, ContractIssue};

pub(crate) const CONTRACTS_HELP_COMMAND: &str = "perfil contracts fields <extraction|analysis>";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_contracts_help(self) -> Self {
        self.with_contracts_help_data(json!({}))
    }

    pub fn with_contracts_help_data(self, data: Value) -> Self {
        self.with_data(merge_contracts_help_data(data))
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `perfil {cmd} --help` for usage."),
            None => "Run `perfil --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_timestamp(value: &str) -> Self {
        Self::new(
            "invalid_timestamp",
            &format!("`{value}` is not a recognizable date-time."),
            vec![
                "Use an ISO date-time such as `2025-01-01T10:00:00`.".to_string(),
                "Offsets are accepted too: `2025-01-01T10:00:00Z` or `+01:00`.".to_string(),
            ],
        )
        .with_data(json!({
            "value": value,
        }))
    }

    pub fn invalid_contract_format(message: &str, received_format: &str) -> Self {
        Self::new(
            "invalid_contract_format",
            message,
            vec![
                "Provide a JSON object, a JSON array of objects, or CSV with a header row."
                    .to_string(),
            ],
        )
        .with_contracts_help_data(json!({
            "received_format": received_format,
            "supported_formats": ["json_object", "json_array", "csv"],
        }))
    }

    pub fn contract_validation_failed(
        kind: &str,
        summary: ContractCheckSummary,
        issues: Vec<ContractIssue>,
    ) -> Self {
        let invalid = summary.rows_invalid;
        Self::new(
            "contract_validation_failed",
            &format!("{invalid} {kind} record(s) do not match the pipeline contract."),
            vec![
                "Fix the listed fields in the pipeline output.".to_string(),
                format!("Run `perfil contracts fields {kind}` to review the expected shape."),
            ],
        )
        .with_contracts_help_data(json!({
            "kind": kind,
            "summary": summary,
            "issues": issues,
        }))
    }

    pub fn input_read_failed(path: &str, detail: &str) -> Self {
        Self::new(
            "input_read_failed",
            &format!("Could not read input `{path}`: {detail}"),
            vec!["Verify the path exists and is readable.".to_string()],
        )
    }

    pub fn edge_bind_failed(addr: &str, detail: &str) -> Self {
        Self::new(
            "edge_bind_failed",
            &format!("Could not listen on `{addr}`: {detail}"),
            vec![
                "Pick a free address with `--addr` or `PERFIL_EDGE_ADDR`.".to_string(),
                "Stop any other process bound to that port.".to_string(),
            ],
        )
    }

    pub fn edge_request_malformed(detail: &str) -> Self {
        Self::new(
            "edge_request_malformed",
            &format!("Malformed HTTP request: {detail}"),
            vec!["Send an HTTP/1.1 request with a valid request line and headers.".to_string()],
        )
    }

    pub fn edge_payload_too_large(limit: usize) -> Self {
        Self::new(
            "edge_payload_too_large",
            &format!("Request body exceeds the {limit} byte limit."),
            vec!["Send one record per request.".to_string()],
        )
    }

    pub fn route_not_found(path: &str) -> Self {
        Self::new(
            "route_not_found",
            &format!("No route matches `{path}`."),
            vec![
                "Available routes: GET /health, POST /contracts/extraction, POST /contracts/analysis, POST /messages/format-time."
                    .to_string(),
            ],
        )
    }

    pub fn method_not_allowed(method: &str, path: &str, allowed: &str) -> Self {
        Self::new(
            "method_not_allowed",
            &format!("`{method}` is not allowed on `{path}`."),
            vec![format!("Use `{allowed} {path}`.")],
        )
        .with_data(json!({
            "allowed": allowed,
        }))
    }

    pub fn edge_io(detail: &str) -> Self {
        Self::new("edge_io_failed", detail, Vec::new())
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

fn merge_contracts_help_data(mut data: Value) -> Value {
    if !data.is_object() {
        data = json!({});
    }

    if let Some(object) = data.as_object_mut() {
        object.insert(
            "help_command".to_string(),
            Value::String(CONTRACTS_HELP_COMMAND.to_string()),
        );
    }

    data
}

pub type ClientResult<T> = Result<T, ClientError>;
