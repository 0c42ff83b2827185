use perfil_client::ClientError;
use serde_json::Value;

use super::format::{Align, Column, render_table};

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    let issues = error
        .data
        .as_ref()
        .and_then(|data| data.get("issues"))
        .and_then(Value::as_array);
    if let Some(issues) = issues.filter(|rows| !rows.is_empty()) {
        lines.push(String::new());
        lines.push("Issues:".to_string());
        lines.extend(render_issue_rows(issues));
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

fn render_issue_rows(issues: &[Value]) -> Vec<String> {
    let columns = [
        Column {
            name: "Row",
            align: Align::Right,
        },
        Column {
            name: "Field",
            align: Align::Left,
        },
        Column {
            name: "Problem",
            align: Align::Left,
        },
    ];
    let rows = issues
        .iter()
        .map(|issue| {
            vec![
                issue
                    .get("row")
                    .and_then(Value::as_i64)
                    .map(|row| row.to_string())
                    .unwrap_or_default(),
                issue
                    .get("field")
                    .and_then(Value::as_str)
                    .unwrap_or("-")
                    .to_string(),
                issue
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    render_table(&columns, &rows, 2)
}
