use std::io;

use serde_json::Value;

use super::format::key_value_rows;

pub fn render_time_format(data: &Value) -> io::Result<String> {
    let display = string_field(data, "display")?;

    let mut lines = vec![display, String::new()];
    lines.extend(key_value_rows(
        &[
            ("Input", string_field(data, "input")?),
            ("Now", string_field(data, "now")?),
            ("Day", string_field(data, "day")?),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

fn string_field(data: &Value, key: &str) -> io::Result<String> {
    data.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| io::Error::other(format!("time output requires `{key}`")))
}
