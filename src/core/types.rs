//! Domain types shared by the resolver stages.

use crate::core::constants;

/// Name of an environment variable (e.g. `DATABASE_HOST`).
pub type VarName = String;

/// Raw connection parameters, before URL assembly.
///
/// Absent values are empty strings. Built fresh for every resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionFields {
    pub driver: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: String,
    pub database_name: String,
}

impl ConnectionFields {
    /// Fill in the default port and driver where they resolved empty.
    pub fn with_defaults(mut self) -> Self {
        if self.port.is_empty() {
            self.port = constants::DEFAULT_PORT.to_string();
        }
        if self.driver.is_empty() {
            self.driver = constants::DEFAULT_DRIVER.to_string();
        }
        self
    }

    /// Replace host and port with a discovered endpoint.
    pub fn apply(&mut self, endpoint: ResolvedEndpoint) {
        self.host = endpoint.host;
        self.port = endpoint.port;
    }
}

/// Host and port produced by a successful discovery chain.
///
/// Only ever built for discoverable hostnames, and always with both fields set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub host: String,
    pub port: String,
}

/// One target of an SRV answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrvTarget {
    pub target: String,
    pub port: u16,
}

impl SrvTarget {
    pub fn new(target: impl Into<String>, port: u16) -> Self {
        Self {
            target: target.into(),
            port,
        }
    }
}
