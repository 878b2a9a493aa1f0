//! Production DNS client built on `hickory-resolver`.
//!
//! Every query gets a fresh resolver bound to a single UDP name server and a
//! current-thread runtime that lives only for that query. Results are never
//! cached and failed queries are never retried.

use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use hickory_resolver::config::{
    LookupIpStrategy, NameServerConfig, Protocol, ResolverConfig, ResolverOpts,
};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::TokioAsyncResolver;
use tracing::debug;

use super::{DiscoveryResolver, DnsQuery};
use crate::core::types::SrvTarget;
use crate::error::DiscoveryError;

/// DNS over UDP against an explicitly chosen server.
#[derive(Debug, Default, Clone, Copy)]
pub struct HickoryResolver;

impl HickoryResolver {
    pub fn new() -> Self {
        Self
    }

    fn resolver(server: SocketAddr, timeout: Duration) -> TokioAsyncResolver {
        let mut config = ResolverConfig::new();
        config.add_name_server(NameServerConfig::new(server, Protocol::Udp));

        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;
        opts.use_hosts_file = false;
        opts.ip_strategy = LookupIpStrategy::Ipv4thenIpv6;

        TokioAsyncResolver::tokio(config, opts)
    }

    /// Run one lookup to completion under a hard deadline.
    fn run<T, F, Fut>(query: &DnsQuery<'_>, lookup: F) -> Result<T, DiscoveryError>
    where
        F: FnOnce(TokioAsyncResolver) -> Fut,
        Fut: Future<Output = Result<T, ResolveError>>,
    {
        super::runtime()?
            .block_on(async move {
                let resolver = Self::resolver(query.server, query.timeout);
                tokio::time::timeout(query.timeout, lookup(resolver)).await
            })
            .map_err(|_| DiscoveryError::Timeout {
                name: query.name.to_string(),
                timeout: query.timeout,
            })?
            .map_err(|source| DiscoveryError::Lookup {
                name: query.name.to_string(),
                source,
            })
    }
}

impl DiscoveryResolver for HickoryResolver {
    fn lookup_srv(&self, query: &DnsQuery<'_>) -> Result<Vec<SrvTarget>, DiscoveryError> {
        debug!(server = %query.server, name = query.name, "SRV query");
        let name = query.name.to_string();

        let lookup = match Self::run(query, |resolver| async move { resolver.srv_lookup(name).await }) {
            Err(err) if is_empty_answer(&err) => return Ok(Vec::new()),
            other => other?,
        };

        Ok(lookup
            .iter()
            .map(|srv| SrvTarget::new(srv.target().to_utf8(), srv.port()))
            .collect())
    }

    fn lookup_address(&self, query: &DnsQuery<'_>) -> Result<Vec<IpAddr>, DiscoveryError> {
        debug!(server = %query.server, name = query.name, "address query");
        let name = query.name.to_string();

        let lookup = match Self::run(query, |resolver| async move { resolver.lookup_ip(name).await }) {
            Err(err) if is_empty_answer(&err) => return Ok(Vec::new()),
            other => other?,
        };

        Ok(lookup.iter().collect())
    }
}

/// NXDOMAIN or an answer without records; the caller decides what empty means.
fn is_empty_answer(err: &DiscoveryError) -> bool {
    matches!(
        err,
        DiscoveryError::Lookup { source, .. }
            if matches!(source.kind(), ResolveErrorKind::NoRecordsFound { .. })
    )
}
