//! Resolver configuration.
//!
//! Built once by the command-line layer and passed read-only into the
//! resolver. Nothing here is loaded from files.

use std::time::Duration;

use crate::core::constants;
use crate::core::types::VarName;

/// Names of the six indirection variables, one per connection field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableNames {
    pub host: VarName,
    pub user: VarName,
    pub password: VarName,
    pub driver: VarName,
    pub database_name: VarName,
    pub port: VarName,
}

impl Default for VariableNames {
    fn default() -> Self {
        Self {
            host: constants::HOST_VAR.to_string(),
            user: constants::USER_VAR.to_string(),
            password: constants::PASSWORD_VAR.to_string(),
            driver: constants::DRIVER_VAR.to_string(),
            database_name: constants::NAME_VAR.to_string(),
            port: constants::PORT_VAR.to_string(),
        }
    }
}

/// Everything the connection target resolver needs to know.
#[derive(Debug, Clone)]
pub struct ResolveConfig {
    /// Variable holding a full URL override.
    pub url_var: VarName,
    /// Indirection variable names.
    pub names: VariableNames,
    /// Hostnames with this suffix go through DNS discovery. Empty disables discovery.
    pub service_suffix: String,
    /// Deadline applied to each DNS query independently.
    pub query_timeout: Duration,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            url_var: constants::URL_VAR.to_string(),
            names: VariableNames::default(),
            service_suffix: constants::SERVICE_SUFFIX.to_string(),
            query_timeout: constants::QUERY_TIMEOUT,
        }
    }
}

impl ResolveConfig {
    /// Whether `name` ends with the configured service suffix.
    ///
    /// A single trailing root dot is ignored, so `db.service.consul.` matches.
    pub fn is_discoverable(&self, name: &str) -> bool {
        if self.service_suffix.is_empty() {
            return false;
        }
        strip_root(name).ends_with(strip_root(&self.service_suffix))
    }
}

/// Drop the trailing root label dot of a fully-qualified name.
pub fn strip_root(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}
