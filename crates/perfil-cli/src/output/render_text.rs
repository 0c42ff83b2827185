use std::io;

use serde_json::Value;

/// Prints the fragment as-is so it can be piped into a file.
pub fn render_html(data: &Value) -> io::Result<String> {
    data.get("html")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| io::Error::other("render output requires html"))
}
