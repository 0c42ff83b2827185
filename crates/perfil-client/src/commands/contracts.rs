use crate::contracts::analysis::ContractKind;
use crate::contracts::check::check_contracts;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ContractCheckData, ContractCheckSummary, ContractFieldsData};
use crate::input::resolve_source;
use crate::{ClientError, ClientResult};

pub fn check(kind: &str, path: Option<String>) -> ClientResult<SuccessEnvelope> {
    check_with_stdin(kind, path, None)
}

pub(crate) fn check_with_stdin(
    kind: &str,
    path: Option<String>,
    stdin_override: Option<String>,
) -> ClientResult<SuccessEnvelope> {
    let kind = ContractKind::parse(kind)?;
    let source = resolve_source(path, stdin_override)?;
    let checked = check_contracts(kind, &source.content)?;

    let summary = ContractCheckSummary {
        rows_read: checked.rows_read,
        rows_valid: checked.rows_valid(),
        rows_invalid: checked.rows_invalid(),
    };
    if !checked.issues.is_empty() {
        return Err(ClientError::contract_validation_failed(
            kind.as_str(),
            summary,
            checked.issues,
        ));
    }

    let data = ContractCheckData {
        kind: kind.as_str().to_string(),
        format: checked.format.as_str().to_string(),
        source: source.source_ref,
        summary,
        records: checked.records,
    };
    success("contracts check", data)
}

pub fn fields(kind: &str) -> ClientResult<SuccessEnvelope> {
    let kind = ContractKind::parse(kind)?;
    let data = ContractFieldsData {
        kind: kind.as_str().to_string(),
        fields: kind.fields().to_vec(),
    };
    success("contracts fields", data)
}
