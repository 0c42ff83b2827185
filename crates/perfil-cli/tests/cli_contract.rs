use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use serde_json::Value;
use tempfile::TempDir;

struct CliRun {
    code: Option<i32>,
    stdout: String,
}

fn run_cli_with_input(args: &[&str], input: Option<&str>) -> CliRun {
    let mut command = Command::new(env!("CARGO_BIN_EXE_perfil"));
    command.args(args);
    command.env_remove("PERFIL_EDGE_ADDR");
    command.env("PERFIL_LOG", "off");
    command.stdin(if input.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    let child_spawn = command.spawn();
    assert!(child_spawn.is_ok());
    if let Ok(mut child) = child_spawn {
        if let Some(body) = input {
            if let Some(mut pipe) = child.stdin.take() {
                let write_result = pipe.write_all(body.as_bytes());
                assert!(write_result.is_ok());
            }
        }

        let output = child.wait_with_output();
        assert!(output.is_ok());
        if let Ok(result) = output {
            return CliRun {
                code: result.status.code(),
                stdout: String::from_utf8_lossy(&result.stdout).into_owned(),
            };
        }
    }

    CliRun {
        code: None,
        stdout: String::new(),
    }
}

fn run_cli(args: &[&str]) -> CliRun {
    run_cli_with_input(args, None)
}

fn parse_json(body: &str) -> Value {
    let parsed = serde_json::from_str::<Value>(body);
    assert!(parsed.is_ok(), "not JSON: {body}");
    parsed.unwrap_or(Value::Null)
}

fn write_source_file(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    assert!(fs::write(&path, body).is_ok());
    path.display().to_string()
}

#[test]
fn bare_invocation_prints_root_help() {
    let run = run_cli(&[]);
    assert_eq!(run.code, Some(0));
    assert!(run.stdout.starts_with("Perfil - receipt pipeline contracts"));
    assert!(run.stdout.contains("perfil edge serve"));
}

#[test]
fn top_level_help_lists_every_group() {
    let run = run_cli(&["--help"]);
    assert_eq!(run.code, Some(0));
    for group in ["perfil contracts", "perfil time", "perfil render", "perfil edge"] {
        assert!(run.stdout.contains(group), "missing {group}");
    }
}

#[test]
fn time_format_text_and_json() {
    let text = run_cli(&[
        "time",
        "format",
        "2024-12-31T23:59:00",
        "--now",
        "2025-01-01T00:05:00",
    ]);
    assert_eq!(text.code, Some(0));
    assert!(text.stdout.starts_with("Ayer 23:59\n"));

    let json = run_cli(&[
        "time",
        "format",
        "2024-12-15T09:00:00",
        "--now",
        "2025-01-01T00:05:00",
        "--json",
    ]);
    assert_eq!(json.code, Some(0));
    let value = parse_json(&json.stdout);
    assert_eq!(value["ok"], true);
    assert_eq!(value["command"], "time format");
    assert_eq!(value["data"]["display"], "15 dic");
    assert_eq!(value["data"]["day"], "older");
}

#[test]
fn invalid_timestamp_exits_with_user_error() {
    let run = run_cli(&["time", "format", "not-a-date", "--json"]);
    assert_eq!(run.code, Some(1));
    let value = parse_json(&run.stdout);
    assert_eq!(value["ok"], false);
    assert_eq!(value["error"]["code"], "invalid_timestamp");
}

#[test]
fn contracts_check_accepts_valid_csv_file() {
    let temp = TempDir::new();
    assert!(temp.is_ok());
    if let Ok(dir) = temp {
        let path = write_source_file(
            dir.path(),
            "extraction.csv",
            "amount,receipt_date,payment_method,extraction_method,confidence\n\
             45.10,2025-02-03,efectivo,ocr,0.88\n\
             12,2025-02-04,,llm,0.51\n",
        );
        let run = run_cli(&["contracts", "check", "extraction", &path, "--json"]);
        assert_eq!(run.code, Some(0));
        let value = parse_json(&run.stdout);
        assert_eq!(value["data"]["format"], "csv");
        assert_eq!(value["data"]["summary"]["rows_valid"], 2);
        assert!(value["data"]["records"][1].get("payment_method").is_none());
    }
}

#[test]
fn contracts_check_reports_issues_from_stdin() {
    let body = r#"[{"amount": "12", "receipt_date": "2025-02-03", "extraction_method": "ocr", "confidence": 0.5}]"#;
    let json = run_cli_with_input(&["contracts", "check", "extraction", "-", "--json"], Some(body));
    assert_eq!(json.code, Some(1));
    let value = parse_json(&json.stdout);
    assert_eq!(value["error"]["code"], "contract_validation_failed");
    assert_eq!(value["data"]["issues"][0]["field"], "amount");
    assert_eq!(value["data"]["summary"]["rows_invalid"], 1);

    let text = run_cli_with_input(&["contracts", "check", "extraction"], Some(body));
    assert_eq!(text.code, Some(1));
    assert!(text.stdout.contains("Issues:"));
    assert!(text.stdout.contains("amount"));
}

#[test]
fn contracts_fields_lists_analysis_shape() {
    let run = run_cli(&["contracts", "fields", "analysis", "--json"]);
    assert_eq!(run.code, Some(0));
    let value = parse_json(&run.stdout);
    let names = value["data"]["fields"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .filter_map(|field| field["name"].as_str().map(str::to_string))
        .collect::<Vec<String>>();
    assert!(names.contains(&"fraud_reason".to_string()));
    assert!(names.contains(&"risk_level".to_string()));
}

#[test]
fn unknown_contract_kind_points_at_command_help() {
    let run = run_cli(&["contracts", "fields", "fraud", "--json"]);
    assert_eq!(run.code, Some(1));
    let value = parse_json(&run.stdout);
    assert_eq!(value["error"]["code"], "invalid_argument");
    assert_eq!(
        value["error"]["recovery_steps"][0],
        "Run `perfil contracts fields --help` for usage."
    );
}

#[test]
fn render_footer_prints_html() {
    let run = run_cli(&["render", "footer", "--brand", "Clínica <Sur>", "--year", "2031"]);
    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("<footer"));
    assert!(run.stdout.contains("Clínica &lt;Sur&gt;"));
    assert!(run.stdout.contains("2031"));
}

#[test]
fn render_plans_reads_plan_file() {
    let temp = TempDir::new();
    assert!(temp.is_ok());
    if let Ok(dir) = temp {
        let path = write_source_file(
            dir.path(),
            "plans.json",
            r#"[{"name": "Básico", "price_label": "Gratis"}, {"name": "Pro", "price_label": "9 €/mes", "features": ["Análisis ilimitados"], "highlighted": true}]"#,
        );
        let run = run_cli(&["render", "plans", "--plans", &path]);
        assert_eq!(run.code, Some(0));
        assert!(run.stdout.contains("Planes de suscripción"));
        assert!(run.stdout.contains("Análisis ilimitados"));
        assert!(run.stdout.contains("Volver"));
    }
}

#[test]
fn edge_handle_runs_preflight_offline() {
    let raw = "OPTIONS /contracts/analysis HTTP/1.1\r\nOrigin: https://app.example\r\n\r\n";
    let run = run_cli_with_input(&["edge", "handle"], Some(raw));
    assert_eq!(run.code, Some(0));
    assert!(run.stdout.starts_with("HTTP/1.1 200 OK\n"));
    assert!(run.stdout.contains("Access-Control-Allow-Origin: *"));
    assert!(run.stdout.contains(
        "Access-Control-Allow-Headers: authorization, x-client-info, apikey, content-type, x-api-key"
    ));
    assert!(run.stdout.trim_end().ends_with("ok"));
}

#[test]
fn edge_handle_json_reports_not_found_route() {
    let raw = "GET /nowhere HTTP/1.1\r\n\r\n";
    let run = run_cli_with_input(&["edge", "handle", "-", "--json"], Some(raw));
    assert_eq!(run.code, Some(0));
    let value = parse_json(&run.stdout);
    assert_eq!(value["data"]["status"], 404);
    assert_eq!(value["data"]["path"], "/nowhere");
}

#[test]
fn edge_serve_on_taken_port_is_internal_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0");
    assert!(listener.is_ok());
    if let Ok(socket) = listener {
        let addr = socket
            .local_addr()
            .map(|value| value.to_string())
            .unwrap_or_default();
        let run = run_cli(&["edge", "serve", "--addr", &addr]);
        assert_eq!(run.code, Some(2));
        assert!(run.stdout.contains("edge_bind_failed"));
    }
}
