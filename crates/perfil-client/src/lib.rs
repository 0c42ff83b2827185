pub mod commands;
pub mod config;
pub mod contracts;
pub mod edge;
pub mod error;
mod input;
pub mod presentation;
pub mod time;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
