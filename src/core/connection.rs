//! Connection URL assembly.
//!
//! A full URL in the override variable wins outright. Otherwise the fields
//! are read through indirection, the host is run through service discovery,
//! and the result is formatted as
//! `<driver>://<user>:<password>@<host>:<port>/<database>?sslmode=disable`.
//!
//! Fields are interpolated as-is. Credentials or database names containing
//! `:`, `/`, `@` or `?` produce a different (or invalid) URL structure; this
//! is a known limitation and is not escaped.

use tracing::debug;
use url::Url;

use crate::core::config::ResolveConfig;
use crate::core::constants;
use crate::core::discovery::{self, DiscoveryResolver};
use crate::core::env::{read_direct, resolve_indirect, EnvironmentProvider};
use crate::core::types::ConnectionFields;
use crate::error::{MalformedUrlError, Result};

const MASK: &str = "****";

/// Resolve the database URL for the current environment.
///
/// # Errors
///
/// Returns `MalformedUrlError` if the override or assembled string does not
/// parse, or `DiscoveryError` if the host names a service that cannot be
/// resolved.
pub fn database_url(
    config: &ResolveConfig,
    env: &dyn EnvironmentProvider,
    resolver: &dyn DiscoveryResolver,
) -> Result<Url> {
    let raw = read_direct(env, &config.url_var);
    if !raw.is_empty() {
        debug!(var = %config.url_var, "using database url override");
        return Ok(parse(&raw)?);
    }

    let fields = connection_fields(config, env, resolver)?;
    Ok(assemble_url(fields)?)
}

/// Read every connection field and apply service discovery to the host.
///
/// Port and driver defaults are applied before discovery so a static host
/// keeps the default port, and a discovered endpoint overrides it.
pub fn connection_fields(
    config: &ResolveConfig,
    env: &dyn EnvironmentProvider,
    resolver: &dyn DiscoveryResolver,
) -> Result<ConnectionFields> {
    let names = &config.names;

    let mut fields = ConnectionFields {
        driver: resolve_indirect(env, &names.driver),
        user: resolve_indirect(env, &names.user),
        password: resolve_indirect(env, &names.password),
        host: resolve_indirect(env, &names.host),
        port: resolve_indirect(env, &names.port),
        database_name: resolve_indirect(env, &names.database_name),
    }
    .with_defaults();

    if let Some(endpoint) = discovery::resolve_endpoint(config, env, resolver, &fields.host)? {
        fields.apply(endpoint);
    }

    Ok(fields)
}

/// Format fields into a connection URL.
///
/// Empty port and driver fall back to `5432` and `postgres`.
pub fn assemble_url(fields: ConnectionFields) -> std::result::Result<Url, MalformedUrlError> {
    let fields = fields.with_defaults();
    let raw = format!(
        "{}://{}:{}@{}:{}/{}?{}",
        fields.driver,
        fields.user,
        fields.password,
        fields.host,
        fields.port,
        fields.database_name,
        constants::URL_QUERY,
    );
    parse(&raw)
}

fn parse(raw: &str) -> std::result::Result<Url, MalformedUrlError> {
    Url::parse(raw).map_err(|source| MalformedUrlError {
        url: mask_password(raw),
        source,
    })
}

/// Display form of a URL with the password masked.
pub fn redact(url: &Url) -> String {
    if url.password().is_none() {
        return url.to_string();
    }
    let mut masked = url.clone();
    // Only fails for URLs that cannot carry credentials, which have no password.
    let _ = masked.set_password(Some(MASK));
    masked.to_string()
}

/// Best-effort masking for strings that may not parse as URLs.
pub fn mask_password(raw: &str) -> String {
    let Some((scheme, rest)) = raw.split_once("://") else {
        return raw.to_string();
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    let authority = &rest[..authority_end];
    let Some(at) = authority.rfind('@') else {
        return raw.to_string();
    };
    let Some(colon) = authority[..at].find(':') else {
        return raw.to_string();
    };

    format!(
        "{}://{}:{}{}",
        scheme,
        &authority[..colon],
        MASK,
        &rest[at..]
    )
}
