//! dbwire - Resolve database connection URLs from layered, indirect configuration.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── migrate       # Engine commands (new, up, migrate, rollback, ...)
//! │   ├── resolve       # Print the resolved URL
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── config        # Variable names, service suffix, timeouts
//!     ├── env           # Environment access and indirection
//!     ├── discovery/    # DNS SRV service discovery
//!     │   ├── mod       # DiscoveryResolver trait, endpoint resolution
//!     │   └── hickory   # hickory-resolver implementation
//!     ├── connection    # URL assembly and override precedence
//!     └── engine        # dbmate hand-off
//! ```
//!
//! # Resolution
//!
//! 1. A non-empty `DATABASE_URL` is parsed and used as-is.
//! 2. Otherwise each field is read through one level of indirection:
//!    `DATABASE_HOST=APP_DB_HOST`, `APP_DB_HOST=db.service.consul`.
//! 3. A host ending in `.consul` is resolved with DNS SRV (then A/AAAA when
//!    the SRV target is also under `.consul`) against `NET_BRIDGE_GW_IP`,
//!    the host of `CONSUL_HTTP_ADDR`, or `127.0.0.1`.
//! 4. The fields become `<driver>://<user>:<password>@<host>:<port>/<db>?sslmode=disable`.

pub mod cli;
pub mod core;
pub mod error;
