//! Error types.
//!
//! Every failure the resolver can produce is fatal to the invoking command;
//! nothing here is retried.

use std::time::Duration;

use thiserror::Error;

/// Top-level error for dbwire operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Url(#[from] MalformedUrlError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The assembled or supplied connection string is not a valid URL.
#[derive(Error, Debug)]
#[error("malformed database url {url:?}: {source}")]
pub struct MalformedUrlError {
    /// The offending string, with any password masked.
    pub url: String,
    #[source]
    pub source: url::ParseError,
}

/// DNS service discovery failed.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("failed to resolve DNS name {name:?}: query timed out after {}ms", .timeout.as_millis())]
    Timeout { name: String, timeout: Duration },

    #[error("failed to resolve DNS name {name:?}: {source}")]
    Lookup {
        name: String,
        #[source]
        source: hickory_resolver::error::ResolveError,
    },

    #[error("failed to resolve DNS name {name:?}: no SRV records returned")]
    NoRecords { name: String },

    #[error("failed to resolve IP address for {name:?}: no addresses returned")]
    NoAddresses { name: String },

    #[error("invalid DNS server {server:?}: {reason}")]
    Server { server: String, reason: String },

    #[error("failed to start DNS runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Handing off to the migration engine failed.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("migration engine not found: {0}")]
    NotFound(String),

    #[error("failed to start migration engine {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("migration engine `{action}` exited with status {code}")]
    Failed { action: String, code: i32 },

    #[error("a migration name is required")]
    MissingName,
}

pub type Result<T> = std::result::Result<T, Error>;
