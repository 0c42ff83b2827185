use std::io;

use perfil_client::edge::request::reason_phrase;
use serde_json::Value;

pub fn render_edge_serve(data: &Value) -> io::Result<String> {
    let addr = data
        .get("addr")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("edge serve output requires addr"))?;
    let served = data
        .get("requests_served")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    Ok(format!(
        "Edge function on {addr} stopped after {served} request(s)."
    ))
}

/// Renders the handled response the way it would go over the wire.
pub fn render_edge_handle(data: &Value) -> io::Result<String> {
    let status = data
        .get("status")
        .and_then(Value::as_u64)
        .and_then(|value| u16::try_from(value).ok())
        .ok_or_else(|| io::Error::other("edge handle output requires status"))?;

    let mut lines = vec![format!("HTTP/1.1 {status} {}", reason_phrase(status))];
    let headers = data
        .get("headers")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    for header in &headers {
        let name = header.get("name").and_then(Value::as_str).unwrap_or("");
        let value = header.get("value").and_then(Value::as_str).unwrap_or("");
        lines.push(format!("{name}: {value}"));
    }
    lines.push(String::new());
    lines.push(
        data.get("body")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
    );
    Ok(lines.join("\n"))
}
