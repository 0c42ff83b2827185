use std::io;

use serde_json::Value;

use super::format::{Align, Column, key_value_rows, render_table};

pub fn render_contract_check(data: &Value) -> io::Result<String> {
    let kind = required_str(data, "kind")?;
    let summary = data
        .get("summary")
        .and_then(Value::as_object)
        .ok_or_else(|| io::Error::other("contract check output requires summary"))?;
    let count = |key: &str| {
        summary
            .get(key)
            .and_then(Value::as_i64)
            .unwrap_or(0)
            .to_string()
    };

    let mut lines = vec![
        format!("Every {kind} record matches the contract."),
        String::new(),
        "Summary:".to_string(),
    ];
    lines.extend(key_value_rows(
        &[
            ("Source", required_str(data, "source")?.to_string()),
            ("Format", required_str(data, "format")?.to_string()),
            ("Rows read", count("rows_read")),
            ("Rows valid", count("rows_valid")),
        ],
        2,
    ));
    lines.push(String::new());
    lines.push("Use --json to get the normalized records.".to_string());
    Ok(lines.join("\n"))
}

pub fn render_contract_fields(data: &Value) -> io::Result<String> {
    let kind = required_str(data, "kind")?;
    let fields = data
        .get("fields")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("contract fields output requires fields"))?;

    let columns = [
        Column {
            name: "Field",
            align: Align::Left,
        },
        Column {
            name: "Type",
            align: Align::Left,
        },
        Column {
            name: "Required",
            align: Align::Left,
        },
    ];
    let rows = fields
        .iter()
        .map(|field| {
            let required = field
                .get("required")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            vec![
                field
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
                field
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
                if required { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![format!("{kind} contract fields:"), String::new()];
    lines.extend(render_table(&columns, &rows, 2));
    lines.push(String::new());
    lines.push("Optional fields may be omitted or null; CSV cells may be left empty.".to_string());
    Ok(lines.join("\n"))
}

fn required_str<'a>(data: &'a Value, key: &str) -> io::Result<&'a str> {
    data.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other(format!("contracts output requires `{key}`")))
}
