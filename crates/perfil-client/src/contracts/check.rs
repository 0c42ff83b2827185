use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::contracts::analysis::{AnalysisResult, ContractKind, ExtractionResult, JsonType};
use crate::contracts::types::ContractIssue;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    JsonObject,
    JsonArray,
    Csv,
}

impl SourceFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JsonObject => "json_object",
            Self::JsonArray => "json_array",
            Self::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContractCheck {
    pub format: SourceFormat,
    pub rows_read: i64,
    pub records: Vec<Value>,
    pub issues: Vec<ContractIssue>,
}

impl ContractCheck {
    pub fn rows_invalid(&self) -> i64 {
        self.rows_read - self.rows_valid()
    }

    pub fn rows_valid(&self) -> i64 {
        self.records.len() as i64
    }
}

/// Structurally checks pipeline output given as one JSON object, a JSON
/// array of objects, or CSV with a header row.
pub fn check_contracts(kind: ContractKind, content: &str) -> ClientResult<ContractCheck> {
    match kind {
        ContractKind::Extraction => check_typed::<ExtractionResult>(kind, content),
        ContractKind::Analysis => check_typed::<AnalysisResult>(kind, content),
    }
}

/// Checks a single JSON record and returns its normalized form.
pub fn validate_record(
    kind: ContractKind,
    item: &Value,
    row: i64,
) -> Result<Value, Vec<ContractIssue>> {
    match kind {
        ContractKind::Extraction => validate_typed::<ExtractionResult>(kind, item, row),
        ContractKind::Analysis => validate_typed::<AnalysisResult>(kind, item, row),
    }
}

fn check_typed<T>(kind: ContractKind, content: &str) -> ClientResult<ContractCheck>
where
    T: DeserializeOwned + Serialize,
{
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ClientError::invalid_contract_format(
            "Input is empty.",
            "empty",
        ));
    }

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        let parsed = serde_json::from_str::<Value>(trimmed).map_err(|error| {
            ClientError::invalid_contract_format(
                &format!("Invalid JSON input: {error}"),
                "invalid_json",
            )
        })?;
        return match parsed {
            Value::Array(items) => Ok(check_json_items::<T>(kind, &items, SourceFormat::JsonArray)),
            other => Ok(check_json_items::<T>(
                kind,
                std::slice::from_ref(&other),
                SourceFormat::JsonObject,
            )),
        };
    }

    if looks_like_csv(trimmed) {
        return check_csv::<T>(kind, trimmed);
    }

    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(ClientError::invalid_contract_format(
            "JSON input must be an object or an array of objects.",
            "json_scalar",
        ));
    }

    Err(ClientError::invalid_contract_format(
        "Unsupported input format.",
        "unknown",
    ))
}

fn check_json_items<T>(kind: ContractKind, items: &[Value], format: SourceFormat) -> ContractCheck
where
    T: DeserializeOwned + Serialize,
{
    let mut records = Vec::new();
    let mut issues = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match validate_typed::<T>(kind, item, (index as i64) + 1) {
            Ok(record) => records.push(record),
            Err(row_issues) => issues.extend(row_issues),
        }
    }

    ContractCheck {
        format,
        rows_read: items.len() as i64,
        records,
        issues,
    }
}

fn validate_typed<T>(kind: ContractKind, item: &Value, row: i64) -> Result<Value, Vec<ContractIssue>>
where
    T: DeserializeOwned + Serialize,
{
    let Some(object) = item.as_object() else {
        return Err(vec![ContractIssue {
            row,
            field: None,
            message: format!("Entry must be a JSON object, found {}.", describe(item)),
        }]);
    };

    let issues = field_issues(kind, object, row);
    if !issues.is_empty() {
        return Err(issues);
    }

    serde_json::from_value::<T>(item.clone())
        .and_then(|record| serde_json::to_value(&record))
        .map_err(|error| {
            vec![ContractIssue {
                row,
                field: None,
                message: error.to_string(),
            }]
        })
}

fn field_issues(kind: ContractKind, object: &Map<String, Value>, row: i64) -> Vec<ContractIssue> {
    let mut issues = Vec::new();
    for spec in kind.fields() {
        match object.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    issues.push(ContractIssue {
                        row,
                        field: Some(spec.name.to_string()),
                        message: "Required field is missing.".to_string(),
                    });
                }
            }
            Some(value) if !spec.json_type.matches(value) => issues.push(ContractIssue {
                row,
                field: Some(spec.name.to_string()),
                message: format!(
                    "Expected {}, found {}.",
                    spec.json_type.as_str(),
                    describe(value)
                ),
            }),
            Some(_) => {}
        }
    }
    issues
}

fn check_csv<T>(kind: ContractKind, content: &str) -> ClientResult<ContractCheck>
where
    T: DeserializeOwned + Serialize,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| {
            ClientError::invalid_contract_format("CSV header row is missing or unreadable.", "csv")
        })?
        .iter()
        .map(str::to_string)
        .collect::<Vec<String>>();

    let missing = kind
        .fields()
        .iter()
        .filter(|spec| spec.required && !headers.iter().any(|header| header == spec.name))
        .map(|spec| spec.name)
        .collect::<Vec<&str>>();
    if !missing.is_empty() {
        return Err(ClientError::invalid_contract_format(
            &format!(
                "CSV header is missing required columns: {}.",
                missing.join(", ")
            ),
            "csv",
        ));
    }

    let mut rows_read = 0i64;
    let mut records = Vec::new();
    let mut issues = Vec::new();
    for (index, result) in reader.records().enumerate() {
        rows_read += 1;
        let row = (index as i64) + 1;
        let record = match result {
            Ok(value) => value,
            Err(error) => {
                issues.push(ContractIssue {
                    row,
                    field: None,
                    message: error.to_string(),
                });
                continue;
            }
        };
        let object = csv_row_object(kind, &headers, &record);
        match validate_typed::<T>(kind, &Value::Object(object), row) {
            Ok(normalized) => records.push(normalized),
            Err(row_issues) => issues.extend(row_issues),
        }
    }

    Ok(ContractCheck {
        format: SourceFormat::Csv,
        rows_read,
        records,
        issues,
    })
}

// Empty cells are absent for optional fields; other cells are typed by the
// contract where they parse and left as strings otherwise.
fn csv_row_object(
    kind: ContractKind,
    headers: &[String],
    record: &csv::StringRecord,
) -> Map<String, Value> {
    let mut object = Map::new();
    for (header, cell) in headers.iter().zip(record.iter()) {
        let spec = kind.fields().iter().find(|spec| spec.name == header);
        if cell.is_empty() && !spec.is_some_and(|spec| spec.required) {
            continue;
        }
        let value = match spec.map(|spec| spec.json_type) {
            Some(JsonType::Number) => number_cell(cell),
            Some(JsonType::Boolean) => match cell {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::String(cell.to_string()),
            },
            Some(JsonType::String) | None => Value::String(cell.to_string()),
        };
        object.insert(header.clone(), value);
    }
    object
}

fn number_cell(cell: &str) -> Value {
    if let Ok(integer) = cell.parse::<i64>() {
        return Value::from(integer);
    }
    cell.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(cell.to_string()))
}

fn looks_like_csv(content: &str) -> bool {
    content
        .lines()
        .next()
        .map(|line| line.contains(','))
        .unwrap_or(false)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_i64() || number.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
