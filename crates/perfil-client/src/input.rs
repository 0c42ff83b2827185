use std::fs;
use std::io::{IsTerminal, Read};

use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedSource {
    pub(crate) source_ref: String,
    pub(crate) content: String,
}

/// Reads a file path, or stdin when the path is `-` or absent.
pub(crate) fn resolve_source(
    path: Option<String>,
    stdin_override: Option<String>,
) -> ClientResult<ResolvedSource> {
    match path.as_deref() {
        Some("-") | None => {
            let stdin_body = read_stdin(stdin_override)?;
            match stdin_body {
                Some(content) => Ok(ResolvedSource {
                    source_ref: "stdin".to_string(),
                    content,
                }),
                None => Err(ClientError::invalid_argument_with_recovery(
                    "No input provided. Pass a file path or pipe input via stdin.",
                    vec![
                        "Pass a file path argument.".to_string(),
                        "Or pipe content and use `-` as the path.".to_string(),
                    ],
                )),
            }
        }
        Some(path_value) => {
            let content = fs::read_to_string(path_value)
                .map_err(|error| ClientError::input_read_failed(path_value, &error.to_string()))?;
            Ok(ResolvedSource {
                source_ref: path_value.to_string(),
                content,
            })
        }
    }
}

fn read_stdin(stdin_override: Option<String>) -> ClientResult<Option<String>> {
    if let Some(value) = stdin_override {
        return Ok(Some(value).filter(|body| !body.trim().is_empty()));
    }

    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|error| ClientError::input_read_failed("stdin", &error.to_string()))?;

    if buffer.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(buffer))
}
