//! Constants used throughout dbwire.
//!
//! Centralizes default variable names and resolution policy values.

use std::time::Duration;

/// Variable holding a complete connection URL; takes precedence over everything else.
pub const URL_VAR: &str = "DATABASE_URL";

/// Indirection variable for the database host.
pub const HOST_VAR: &str = "DATABASE_HOST";

/// Indirection variable for the database user.
pub const USER_VAR: &str = "DATABASE_USER";

/// Indirection variable for the database password.
pub const PASSWORD_VAR: &str = "DATABASE_PASSWORD";

/// Indirection variable for the driver (URL scheme).
pub const DRIVER_VAR: &str = "DATABASE_DRIVER";

/// Indirection variable for the database name.
pub const NAME_VAR: &str = "DATABASE_NAME";

/// Indirection variable for the database port.
pub const PORT_VAR: &str = "DATABASE_PORT";

/// Direct variable overriding the DNS server used for discovery.
pub const BRIDGE_GATEWAY_VAR: &str = "NET_BRIDGE_GW_IP";

/// Direct variable with the discovery agent address (`host:port`).
pub const CONSUL_ADDR_VAR: &str = "CONSUL_HTTP_ADDR";

/// Port used when none is resolved.
pub const DEFAULT_PORT: &str = "5432";

/// Driver used when none is resolved.
pub const DEFAULT_DRIVER: &str = "postgres";

/// Hostnames ending with this suffix are resolved through DNS SRV.
pub const SERVICE_SUFFIX: &str = ".consul";

/// DNS server used when neither override variable is set.
pub const LOOPBACK_DNS: &str = "127.0.0.1";

/// DNS is queried over UDP on this port.
pub const DNS_PORT: u16 = 53;

/// Hard deadline for each individual DNS query.
pub const QUERY_TIMEOUT: Duration = Duration::from_millis(500);

/// Query string appended to every assembled URL.
pub const URL_QUERY: &str = "sslmode=disable";

/// Default migrations directory handed to the engine.
pub const MIGRATIONS_DIR: &str = "./db/migrations";

/// Default schema file handed to the engine.
pub const SCHEMA_FILE: &str = "./db/schema.sql";

/// Migration engine executable looked up on `PATH`.
pub const ENGINE_PROGRAM: &str = "dbmate";
