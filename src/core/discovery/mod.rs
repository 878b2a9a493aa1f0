//! Service endpoint discovery.
//!
//! Hostnames ending with the configured service suffix are not addresses but
//! service names published through DNS. They resolve in two sequential steps
//! against one chosen DNS server:
//!
//! ```text
//! db.service.consul ──SRV──▶ 10-0-0-5.node.consul:5433 ──A/AAAA──▶ 192.0.2.5:5433
//! ```
//!
//! The second step only runs when the SRV target is itself under the suffix.
//! Each query gets its own deadline; any failure ends the whole resolution.

mod hickory;

pub use hickory::HickoryResolver;

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use tracing::{debug, info};

use crate::core::config::{strip_root, ResolveConfig};
use crate::core::constants;
use crate::core::env::{read_direct, EnvironmentProvider};
use crate::core::types::{ResolvedEndpoint, SrvTarget};
use crate::error::DiscoveryError;

/// Context for a single DNS query. Never outlives the call that made it.
#[derive(Debug, Clone, Copy)]
pub struct DnsQuery<'a> {
    pub server: SocketAddr,
    pub name: &'a str,
    pub timeout: Duration,
}

/// DNS lookups needed by the endpoint resolver.
///
/// Implementations must give up once `query.timeout` elapses and report
/// [`DiscoveryError::Timeout`].
pub trait DiscoveryResolver {
    /// SRV targets for `query.name`, in answer order.
    fn lookup_srv(&self, query: &DnsQuery<'_>) -> Result<Vec<SrvTarget>, DiscoveryError>;

    /// Addresses for `query.name`, in answer order.
    fn lookup_address(&self, query: &DnsQuery<'_>) -> Result<Vec<IpAddr>, DiscoveryError>;
}

/// Pick the DNS server host for discovery.
///
/// Order: `NET_BRIDGE_GW_IP`, then the host part of `CONSUL_HTTP_ADDR`, then
/// loopback. Evaluated once per resolution; there is no fallback between
/// candidates after a failed query.
pub fn select_dns_server(env: &dyn EnvironmentProvider) -> String {
    let gateway = read_direct(env, constants::BRIDGE_GATEWAY_VAR);
    if !gateway.is_empty() {
        return gateway;
    }

    let agent = read_direct(env, constants::CONSUL_ADDR_VAR);
    let host = agent_host(&agent);
    if !host.is_empty() {
        return host.to_string();
    }

    constants::LOOPBACK_DNS.to_string()
}

/// Host segment of a discovery agent address such as `http://10.0.0.1:8500`.
fn agent_host(addr: &str) -> &str {
    let addr = addr
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(addr);
    addr.split(':').next().unwrap_or_default()
}

/// Turn a DNS server host into the UDP socket address to query.
///
/// IP literals are used as-is. Anything else goes through the system resolver
/// and must answer within `timeout`.
pub fn server_addr(host: &str, timeout: Duration) -> Result<SocketAddr, DiscoveryError> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, constants::DNS_PORT));
    }

    let runtime = runtime()?;
    let found = runtime.block_on(lookup_server(host, timeout));
    // getaddrinfo runs on the blocking pool and cannot be cancelled.
    runtime.shutdown_background();
    found
}

async fn lookup_server(host: &str, timeout: Duration) -> Result<SocketAddr, DiscoveryError> {
    let invalid = |reason: String| DiscoveryError::Server {
        server: host.to_string(),
        reason,
    };

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host((host, constants::DNS_PORT)))
        .await
        .map_err(|_| DiscoveryError::Timeout {
            name: host.to_string(),
            timeout,
        })?
        .map_err(|e| invalid(e.to_string()))?;

    addrs.next().ok_or_else(|| invalid("no addresses".to_string()))
}

/// Single-threaded runtime that lives for one blocking call.
fn runtime() -> Result<tokio::runtime::Runtime, DiscoveryError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(DiscoveryError::Runtime)
}

/// Resolve `hostname` to a concrete endpoint if it names a discoverable service.
///
/// Returns `Ok(None)` without touching the network when `hostname` does not
/// carry the service suffix; the caller keeps its own host and port.
///
/// # Errors
///
/// Any DNS failure, timeout, or empty answer is a [`DiscoveryError`].
pub fn resolve_endpoint(
    config: &ResolveConfig,
    env: &dyn EnvironmentProvider,
    resolver: &dyn DiscoveryResolver,
    hostname: &str,
) -> Result<Option<ResolvedEndpoint>, DiscoveryError> {
    if !config.is_discoverable(hostname) {
        return Ok(None);
    }

    let server_host = select_dns_server(env);
    info!(
        hostname,
        server = %server_host,
        "resolving address using DNS server"
    );
    let server = server_addr(&server_host, config.query_timeout)?;

    let srv = resolver.lookup_srv(&DnsQuery {
        server,
        name: hostname,
        timeout: config.query_timeout,
    })?;
    let first = srv.into_iter().next().ok_or_else(|| DiscoveryError::NoRecords {
        name: hostname.to_string(),
    })?;

    let target = strip_root(&first.target);
    let port = first.port.to_string();
    debug!(hostname, target, port = %port, "selected first SRV target");

    let host = if config.is_discoverable(target) {
        let addrs = resolver.lookup_address(&DnsQuery {
            server,
            name: target,
            timeout: config.query_timeout,
        })?;
        addrs
            .first()
            .ok_or_else(|| DiscoveryError::NoAddresses {
                name: target.to_string(),
            })?
            .to_string()
    } else {
        target.to_string()
    };

    info!(hostname, host = %host, port = %port, "resolved service endpoint");

    Ok(Some(ResolvedEndpoint { host, port }))
}
