use serde::Deserialize;
use serde_json::{Value, json};

use super::cors::{apply_cors, preflight_response};
use super::request::{EdgeRequest, EdgeResponse, Method};
use crate::commands::time::describe;
use crate::contracts::analysis::ContractKind;
use crate::contracts::check::validate_record;
use crate::contracts::envelope::{SuccessEnvelope, failure_from_error, success};
use crate::contracts::types::ContractCheckSummary;
use crate::{ClientError, ClientResult};

pub trait Handler: Send + Sync {
    fn handle(&self, request: &EdgeRequest) -> EdgeResponse;
}

/// Answers pre-flight requests itself and stamps the CORS headers onto
/// everything the inner handler returns.
#[derive(Debug, Clone)]
pub struct Cors<H> {
    inner: H,
}

impl<H: Handler> Cors<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H: Handler> Handler for Cors<H> {
    fn handle(&self, request: &EdgeRequest) -> EdgeResponse {
        if request.method == Method::Options {
            return preflight_response();
        }
        apply_cors(self.inner.handle(request))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Health,
    Contract(ContractKind),
    FormatTime,
}

impl Route {
    fn resolve(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "/health" => Some(Self::Health),
            "/contracts/extraction" => Some(Self::Contract(ContractKind::Extraction)),
            "/contracts/analysis" => Some(Self::Contract(ContractKind::Analysis)),
            "/messages/format-time" => Some(Self::FormatTime),
            _ => None,
        }
    }

    fn allowed_method(self) -> Method {
        match self {
            Self::Health => Method::Get,
            Self::Contract(_) | Self::FormatTime => Method::Post,
        }
    }

    fn command(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Contract(ContractKind::Extraction) => "contracts extraction",
            Self::Contract(ContractKind::Analysis) => "contracts analysis",
            Self::FormatTime => "messages format-time",
        }
    }
}

#[derive(Debug, Deserialize)]
struct FormatTimeBody {
    timestamp: String,
    #[serde(default)]
    now: Option<String>,
}

/// Routes requests that carry pipeline output or chat timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineHandler;

impl Handler for PipelineHandler {
    fn handle(&self, request: &EdgeRequest) -> EdgeResponse {
        let Some(route) = Route::resolve(&request.path) else {
            return failure_response(&ClientError::route_not_found(&request.path));
        };

        let allowed = route.allowed_method();
        if request.method != allowed {
            let error = ClientError::method_not_allowed(
                request.method.as_str(),
                &request.path,
                allowed.as_str(),
            );
            let mut response = failure_response(&error);
            response.set_header("Allow", allowed.as_str());
            return response;
        }

        match dispatch(route, request) {
            Ok(envelope) => EdgeResponse::json(200, &envelope),
            Err(error) => failure_response(&error),
        }
    }
}

fn dispatch(route: Route, request: &EdgeRequest) -> ClientResult<SuccessEnvelope> {
    match route {
        Route::Health => success(route.command(), json!({ "status": "ok" })),
        Route::Contract(kind) => {
            let body = request.body_json::<Value>()?;
            let record = validate_record(kind, &body, 1).map_err(|issues| {
                let summary = ContractCheckSummary {
                    rows_read: 1,
                    rows_valid: 0,
                    rows_invalid: 1,
                };
                ClientError::contract_validation_failed(kind.as_str(), summary, issues)
            })?;
            success(route.command(), record)
        }
        Route::FormatTime => {
            let body = request.body_json::<FormatTimeBody>()?;
            success(
                route.command(),
                describe(&body.timestamp, body.now.as_deref())?,
            )
        }
    }
}

pub fn failure_response(error: &ClientError) -> EdgeResponse {
    EdgeResponse::json(status_for_error(error), &failure_from_error(error))
}

pub fn status_for_error(error: &ClientError) -> u16 {
    match error.code.as_str() {
        "route_not_found" => 404,
        "method_not_allowed" => 405,
        "edge_payload_too_large" => 413,
        "contract_validation_failed" => 422,
        "edge_io_failed" => 500,
        code if code.starts_with("internal_") => 500,
        _ => 400,
    }
}
