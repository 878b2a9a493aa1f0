//! Url command.
//!
//! Prints the resolved database URL without running the migration engine.

use serde::Serialize;

use crate::core::config::ResolveConfig;
use crate::core::connection::{database_url, redact};
use crate::core::discovery::HickoryResolver;
use crate::core::env::ProcessEnv;
use crate::error::Result;

/// JSON view of a resolved URL.
#[derive(Debug, Serialize)]
struct Resolved {
    url: String,
    driver: String,
    user: String,
    host: Option<String>,
    port: Option<u16>,
    database: String,
}

/// Resolve the URL from the process environment and print it.
pub fn execute(config: &ResolveConfig, show_password: bool, json: bool) -> Result<()> {
    let url = database_url(config, &ProcessEnv, &HickoryResolver::new())?;
    let display = if show_password {
        url.to_string()
    } else {
        redact(&url)
    };

    if json {
        let resolved = Resolved {
            url: display,
            driver: url.scheme().to_string(),
            user: url.username().to_string(),
            host: url.host_str().map(str::to_string),
            port: url.port(),
            database: url.path().trim_start_matches('/').to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        println!("{}", display);
    }

    Ok(())
}
