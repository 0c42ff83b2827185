use std::ffi::OsString;
use std::time::Duration;

pub const EDGE_ADDR_ENV: &str = "PERFIL_EDGE_ADDR";
pub const LOG_FILTER_ENV: &str = "PERFIL_LOG";
pub const DEFAULT_EDGE_ADDR: &str = "127.0.0.1:8787";
pub const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeConfig {
    pub addr: String,
    pub read_timeout: Duration,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_EDGE_ADDR.to_string(),
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

impl EdgeConfig {
    /// `--addr` wins over `PERFIL_EDGE_ADDR`, which wins over the default.
    pub fn resolve(addr_override: Option<&str>) -> Self {
        Self::resolve_with(addr_override, std::env::var_os(EDGE_ADDR_ENV))
    }

    fn resolve_with(addr_override: Option<&str>, env_value: Option<OsString>) -> Self {
        let addr = match addr_override {
            Some(value) => value.to_string(),
            None => env_value
                .map(|value| value.to_string_lossy().trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_EDGE_ADDR.to_string()),
        };
        Self {
            addr,
            ..Self::default()
        }
    }
}

pub fn log_filter() -> String {
    std::env::var(LOG_FILTER_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}
