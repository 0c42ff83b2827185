use crate::ClientResult;
use crate::config::EdgeConfig;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{EdgeHandleData, HeaderEntry};
use crate::edge::http::read_request;
use crate::edge::{Cors, Handler, PipelineHandler, serve as serve_edge};
use crate::input::resolve_source;

pub fn serve(addr: Option<&str>) -> ClientResult<SuccessEnvelope> {
    let config = EdgeConfig::resolve(addr);
    let data = serve_edge(&config, Cors::new(PipelineHandler))?;
    success("edge serve", data)
}

/// Runs one raw HTTP request through the edge handler without a socket.
pub fn handle(path: Option<String>) -> ClientResult<SuccessEnvelope> {
    handle_with_stdin(path, None)
}

pub(crate) fn handle_with_stdin(
    path: Option<String>,
    stdin_override: Option<String>,
) -> ClientResult<SuccessEnvelope> {
    let source = resolve_source(path, stdin_override)?;
    let request = read_request(&mut source.content.as_bytes())?;
    let response = Cors::new(PipelineHandler).handle(&request);

    let data = EdgeHandleData {
        method: request.method.as_str().to_string(),
        path: request.path.clone(),
        status: response.status,
        headers: response
            .headers
            .iter()
            .map(|(name, value)| HeaderEntry {
                name: name.clone(),
                value: value.clone(),
            })
            .collect(),
        body: response.body_text(),
    };
    success("edge handle", data)
}
