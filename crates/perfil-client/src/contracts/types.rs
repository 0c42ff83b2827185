use serde::Serialize;
use serde_json::Value;

use crate::contracts::analysis::FieldSpec;

#[derive(Debug, Clone, Serialize)]
pub struct TimeFormatData {
    pub input: String,
    pub now: String,
    pub day: String,
    pub display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractIssue {
    pub row: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractCheckSummary {
    pub rows_read: i64,
    pub rows_valid: i64,
    pub rows_invalid: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractCheckData {
    pub kind: String,
    pub format: String,
    pub source: String,
    pub summary: ContractCheckSummary,
    pub records: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractFieldsData {
    pub kind: String,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderData {
    pub component: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeHandleData {
    pub method: String,
    pub path: String,
    pub status: u16,
    pub headers: Vec<HeaderEntry>,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeServeData {
    pub addr: String,
    pub requests_served: u64,
}
