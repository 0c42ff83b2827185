use std::io::{self, BufRead, Read, Write};

use super::request::{EdgeRequest, EdgeResponse, Method, reason_phrase};
use crate::{ClientError, ClientResult};

pub const MAX_BODY_BYTES: usize = 1024 * 1024;
pub const MAX_LINE_BYTES: usize = 8 * 1024;
pub const MAX_HEAD_BYTES: usize = 64 * 1024;
const MAX_HEADER_COUNT: usize = 100;

/// Reads one HTTP/1.x request. Bodies are only taken from `Content-Length`.
/// Each head line is capped at [`MAX_LINE_BYTES`] and the whole head at
/// [`MAX_HEAD_BYTES`].
pub fn read_request<R: BufRead>(reader: &mut R) -> ClientResult<EdgeRequest> {
    let request_line = read_line(reader)?;
    let mut head_bytes = request_line.len();
    if request_line.is_empty() {
        return Err(ClientError::edge_request_malformed(
            "connection closed before the request line",
        ));
    }

    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ClientError::edge_request_malformed(&format!(
            "request line `{request_line}` must be `METHOD TARGET VERSION`"
        )));
    };
    if !version.starts_with("HTTP/1.") {
        return Err(ClientError::edge_request_malformed(&format!(
            "unsupported protocol version `{version}`"
        )));
    }

    let mut request = EdgeRequest::new(Method::parse(method), target);
    loop {
        let line = read_line(reader)?;
        if line.is_empty() {
            break;
        }
        head_bytes += line.len();
        if head_bytes > MAX_HEAD_BYTES {
            return Err(ClientError::edge_request_malformed(&format!(
                "request head exceeds {MAX_HEAD_BYTES} bytes"
            )));
        }
        if request.headers.len() == MAX_HEADER_COUNT {
            return Err(ClientError::edge_request_malformed("too many headers"));
        }
        let Some((name, value)) = line.split_once(':') else {
            return Err(ClientError::edge_request_malformed(&format!(
                "header line `{line}` has no colon"
            )));
        };
        request = request.with_header(name.trim(), value.trim());
    }

    if request
        .header("transfer-encoding")
        .is_some_and(|value| value.eq_ignore_ascii_case("chunked"))
    {
        return Err(ClientError::edge_request_malformed(
            "chunked request bodies are not supported",
        ));
    }

    let length = match request.header("content-length") {
        Some(value) => value.parse::<usize>().map_err(|_| {
            ClientError::edge_request_malformed(&format!("invalid content-length `{value}`"))
        })?,
        None => 0,
    };
    if length > MAX_BODY_BYTES {
        return Err(ClientError::edge_payload_too_large(MAX_BODY_BYTES));
    }

    let mut body = vec![0u8; length];
    reader
        .read_exact(&mut body)
        .map_err(|error| ClientError::edge_io(&format!("reading request body failed: {error}")))?;
    Ok(request.with_body(body))
}

pub fn write_response<W: Write>(writer: &mut W, response: &EdgeResponse) -> io::Result<()> {
    let mut head = format!(
        "HTTP/1.1 {} {}\r\n",
        response.status,
        reason_phrase(response.status)
    );
    for (name, value) in &response.headers {
        if name.eq_ignore_ascii_case("content-length") || name.eq_ignore_ascii_case("connection") {
            continue;
        }
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str(&format!("Content-Length: {}\r\n", response.body.len()));
    head.push_str("Connection: close\r\n\r\n");

    writer.write_all(head.as_bytes())?;
    writer.write_all(&response.body)?;
    writer.flush()
}

// Accepts both CRLF and bare LF line endings; an empty string means end of headers or EOF.
fn read_line<R: BufRead>(reader: &mut R) -> ClientResult<String> {
    let mut raw = Vec::new();
    reader
        .by_ref()
        .take(MAX_LINE_BYTES as u64 + 1)
        .read_until(b'\n', &mut raw)
        .map_err(|error| match error.kind() {
            io::ErrorKind::InvalidData => ClientError::edge_request_malformed(&error.to_string()),
            _ => ClientError::edge_io(&format!("reading request failed: {error}")),
        })?;
    if raw.len() > MAX_LINE_BYTES {
        return Err(ClientError::edge_request_malformed(&format!(
            "request line or header exceeds {MAX_LINE_BYTES} bytes"
        )));
    }

    let line = String::from_utf8(raw).map_err(|_| {
        ClientError::edge_request_malformed("request line or header is not valid UTF-8")
    })?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::{MAX_BODY_BYTES, MAX_HEAD_BYTES, MAX_LINE_BYTES, read_request, write_response};
    use crate::edge::handler::status_for_error;
    use crate::edge::request::{EdgeResponse, Method};

    #[test]
    fn parses_request_line_headers_and_body() {
        let raw = "POST /contracts/analysis?source=app HTTP/1.1\r\n\
                   Host: localhost\r\n\
                   Content-Type: application/json\r\n\
                   Content-Length: 2\r\n\
                   \r\n\
                   {}";
        let parsed = read_request(&mut raw.as_bytes());
        assert!(parsed.is_ok());
        if let Ok(request) = parsed {
            assert_eq!(request.method, Method::Post);
            assert_eq!(request.path, "/contracts/analysis");
            assert_eq!(request.query.as_deref(), Some("source=app"));
            assert_eq!(request.header("content-type"), Some("application/json"));
            assert_eq!(request.body, b"{}".to_vec());
        }
    }

    #[test]
    fn accepts_bare_newlines() {
        let raw = "OPTIONS /health HTTP/1.1\nOrigin: https://app.example\n\n";
        let parsed = read_request(&mut raw.as_bytes());
        assert!(parsed.is_ok());
        if let Ok(request) = parsed {
            assert_eq!(request.method, Method::Options);
            assert!(request.body.is_empty());
        }
    }

    #[test]
    fn rejects_broken_request_lines() {
        let cases = [
            "",
            "GET\r\n\r\n",
            "GET / HTTP/2\r\n\r\n",
            "GET / HTTP/1.1\r\nbroken header\r\n\r\n",
            "POST / HTTP/1.1\r\nContent-Length: ten\r\n\r\n",
        ];
        for raw in cases {
            let parsed = read_request(&mut raw.as_bytes());
            assert!(parsed.is_err(), "accepted: {raw:?}");
            if let Err(error) = parsed {
                assert_eq!(error.code, "edge_request_malformed");
            }
        }

        let mut invalid_utf8 = b"GET / HTTP/1.1\r\nX-Name: ".to_vec();
        invalid_utf8.extend_from_slice(&[0xff, 0xfe]);
        invalid_utf8.extend_from_slice(b"\r\n\r\n");
        let parsed = read_request(&mut invalid_utf8.as_slice());
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "edge_request_malformed");
            assert_eq!(status_for_error(&error), 400);
        }
    }

    #[test]
    fn rejects_oversized_header_lines() {
        let raw = format!(
            "GET / HTTP/1.1\r\nX-Pad: {}\r\n\r\n",
            "a".repeat(8 * 1024 * 1024)
        );
        let parsed = read_request(&mut raw.as_bytes());
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "edge_request_malformed");
        }
    }

    #[test]
    fn rejects_oversized_request_heads() {
        let header = format!("X-Pad: {}\r\n", "a".repeat(MAX_LINE_BYTES / 2));
        let raw = format!(
            "GET / HTTP/1.1\r\n{}\r\n",
            header.repeat(MAX_HEAD_BYTES / (MAX_LINE_BYTES / 2) + 1)
        );
        let parsed = read_request(&mut raw.as_bytes());
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "edge_request_malformed");
            assert!(error.message.contains("request head exceeds"));
        }
    }

    #[test]
    fn accepts_header_lines_at_the_limit() {
        let value = "a".repeat(MAX_LINE_BYTES - "X-Pad: \r\n".len());
        let raw = format!("GET /health HTTP/1.1\r\nX-Pad: {value}\r\n\r\n");
        let parsed = read_request(&mut raw.as_bytes());
        assert!(parsed.is_ok());
    }

    #[test]
    fn rejects_oversized_bodies_before_reading() {
        let raw = format!(
            "POST / HTTP/1.1\r\nContent-Length: {}\r\n\r\n",
            MAX_BODY_BYTES + 1
        );
        let parsed = read_request(&mut raw.as_bytes());
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "edge_payload_too_large");
        }
    }

    #[test]
    fn truncated_body_is_an_io_error() {
        let raw = "POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\n{}";
        let parsed = read_request(&mut raw.as_bytes());
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "edge_io_failed");
        }
    }

    #[test]
    fn writes_status_headers_and_length() {
        let mut response = EdgeResponse::text(404, "nope");
        response.set_header("Content-Length", "999");
        let mut buffer = Vec::new();
        assert!(write_response(&mut buffer, &response).is_ok());
        let text = String::from_utf8_lossy(&buffer).into_owned();
        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.contains("Content-Type: text/plain; charset=utf-8\r\n"));
        assert!(text.contains("Content-Length: 4\r\n"));
        assert!(!text.contains("999"));
        assert!(text.ends_with("Connection: close\r\n\r\nnope"));
    }
}
