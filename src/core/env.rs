//! Environment access and indirect variable resolution.
//!
//! Deployments point `DATABASE_HOST` (and friends) at whichever variable
//! actually holds the value, so every field is read through one level of
//! indirection. Reads are live: nothing is cached between calls.

use std::collections::BTreeMap;

use tracing::debug;

/// Key-value lookup over an environment.
pub trait EnvironmentProvider {
    /// Value of `name`, or `None` if unset.
    fn get(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvironmentProvider for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }
        std::env::var(name).ok()
    }
}

/// A fixed set of variables, for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    pub fn remove(&mut self, name: &str) {
        self.vars.remove(name);
    }
}

impl<const N: usize> From<[(&str, &str); N]> for MapEnv {
    fn from(pairs: [(&str, &str); N]) -> Self {
        let mut env = Self::new();
        for (name, value) in pairs {
            env.set(name, value);
        }
        env
    }
}

impl EnvironmentProvider for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Read a direct variable, treating unset as empty.
pub fn read_direct(env: &dyn EnvironmentProvider, name: &str) -> String {
    env.get(name).unwrap_or_default()
}

/// Resolve one level of indirection.
///
/// Reads `var`, whose value names a second variable, and returns the value
/// of that second variable. Either lookup coming back empty yields an empty
/// string; defaulting is left to the caller.
///
/// # Arguments
///
/// * `env` - Environment to read from
/// * `var` - Name of the indirection variable (e.g. `DATABASE_HOST`)
pub fn resolve_indirect(env: &dyn EnvironmentProvider, var: &str) -> String {
    let target = read_direct(env, var);
    if target.is_empty() {
        debug!(var, "indirection variable unset");
        return String::new();
    }

    let value = read_direct(env, &target);
    debug!(var, target = %target, found = !value.is_empty(), "resolved indirection");
    value
}
