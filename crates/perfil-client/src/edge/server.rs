use std::io::{BufReader, ErrorKind};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use ulid::Ulid;

use super::cors::apply_cors;
use super::handler::{Handler, failure_response};
use super::http::{read_request, write_response};
use crate::config::EdgeConfig;
use crate::contracts::types::EdgeServeData;
use crate::{ClientError, ClientResult};

const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn bind(config: &EdgeConfig) -> ClientResult<TcpListener> {
    TcpListener::bind(&config.addr)
        .map_err(|error| ClientError::edge_bind_failed(&config.addr, &error.to_string()))
}

/// Serves `handler` until the process exits.
pub fn serve<H: Handler + 'static>(config: &EdgeConfig, handler: H) -> ClientResult<EdgeServeData> {
    let listener = bind(config)?;
    serve_with_shutdown(listener, config, handler, Arc::new(AtomicBool::new(false)))
}

/// Accepts connections on `listener`, one thread per connection, until
/// `shutdown` is set.
pub fn serve_with_shutdown<H: Handler + 'static>(
    listener: TcpListener,
    config: &EdgeConfig,
    handler: H,
    shutdown: Arc<AtomicBool>,
) -> ClientResult<EdgeServeData> {
    let addr = listener
        .local_addr()
        .map(|value| value.to_string())
        .unwrap_or_else(|_| config.addr.clone());
    listener
        .set_nonblocking(true)
        .map_err(|error| ClientError::edge_io(&format!("listener setup failed: {error}")))?;

    let handler = Arc::new(handler);
    let served = Arc::new(AtomicU64::new(0));
    info!(addr = %addr, "edge function listening");

    while !shutdown.load(Ordering::SeqCst) {
        match listener.accept() {
            Ok((stream, peer)) => {
                let handler = Arc::clone(&handler);
                let served = Arc::clone(&served);
                let read_timeout = config.read_timeout;
                thread::spawn(move || {
                    handle_connection(stream, handler.as_ref(), read_timeout, &served);
                });
                debug!(peer = %peer, "accepted connection");
            }
            Err(error) if error.kind() == ErrorKind::WouldBlock => {
                thread::sleep(ACCEPT_POLL_INTERVAL);
            }
            Err(error) if error.kind() == ErrorKind::Interrupted => {}
            Err(error) => {
                return Err(ClientError::edge_io(&format!("accept failed: {error}")));
            }
        }
    }

    info!(addr = %addr, "edge function stopped");
    Ok(EdgeServeData {
        addr,
        requests_served: served.load(Ordering::SeqCst),
    })
}

fn handle_connection<H: Handler + ?Sized>(
    stream: TcpStream,
    handler: &H,
    read_timeout: Duration,
    served: &AtomicU64,
) {
    let request_id = Ulid::new().to_string();
    let started = Instant::now();

    // Accepted sockets inherit non-blocking mode on some platforms.
    if let Err(error) = stream
        .set_nonblocking(false)
        .and_then(|()| stream.set_read_timeout(Some(read_timeout)))
    {
        warn!(request_id = %request_id, error = %error, "could not configure connection");
        return;
    }

    let reader_stream = match stream.try_clone() {
        Ok(value) => value,
        Err(error) => {
            warn!(request_id = %request_id, error = %error, "could not clone connection");
            return;
        }
    };
    let mut reader = BufReader::new(reader_stream);
    let mut writer = stream;

    let (method, path, response) = match read_request(&mut reader) {
        Ok(request) => {
            let response = handler.handle(&request);
            (request.method.as_str().to_string(), request.path, response)
        }
        Err(error) => {
            warn!(
                request_id = %request_id,
                code = %error.code,
                message = %error.message,
                "rejected request"
            );
            (
                "-".to_string(),
                "-".to_string(),
                apply_cors(failure_response(&error)),
            )
        }
    };
    served.fetch_add(1, Ordering::SeqCst);

    if let Err(error) = write_response(&mut writer, &response) {
        warn!(request_id = %request_id, error = %error, "could not write response");
        return;
    }

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = response.status,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "handled edge request"
    );
}
