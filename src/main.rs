//! dbwire - Resolve database URLs and hand them to dbmate.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dbwire::cli::output;
use dbwire::cli::{execute, Cli};
use dbwire::error::{DiscoveryError, EngineError, Error};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("DBWIRE_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("dbwire=debug")
        } else {
            EnvFilter::new("dbwire=info")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        // Format error with suggestion if available
        let error_msg = e.to_string();
        let suggestion = match &e {
            Error::Discovery(DiscoveryError::Timeout { .. } | DiscoveryError::Lookup { .. }) => {
                Some("check NET_BRIDGE_GW_IP or CONSUL_HTTP_ADDR points at a reachable DNS server")
            }
            Error::Engine(EngineError::NotFound(_)) => {
                Some("install dbmate or pass --dbmate-bin")
            }
            Error::Engine(EngineError::MissingName) => Some("run: dbwire new <name>"),
            _ => None,
        };

        output::error(&error_msg);
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
