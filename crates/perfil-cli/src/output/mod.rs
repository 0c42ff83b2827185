mod contracts_text;
mod edge_text;
mod error_text;
mod format;
mod json;
mod mode;
mod render_text;
mod time_text;

use std::io;

use perfil_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "time format" => time_text::render_time_format(&success.data),
        "contracts check" => contracts_text::render_contract_check(&success.data),
        "contracts fields" => contracts_text::render_contract_fields(&success.data),
        "render footer" | "render plans" => render_text::render_html(&success.data),
        "edge serve" => edge_text::render_edge_serve(&success.data),
        "edge handle" => edge_text::render_edge_handle(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
