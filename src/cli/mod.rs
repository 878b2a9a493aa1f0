//! Command-line interface.

pub mod completions;
pub mod migrate;
pub mod output;
pub mod resolve;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::config::{ResolveConfig, VariableNames};
use crate::core::constants;
use crate::core::engine::{Action, EngineOptions};

/// dbwire - Resolve database URLs from indirect env vars and DNS SRV discovery.
#[derive(Parser)]
#[command(
    name = "dbwire",
    about = "Resolve a database URL from indirect env vars and Consul DNS, then run dbmate",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub resolve: ResolveArgs,

    #[command(flatten)]
    pub engine: EngineArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the connection parameters come from.
#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Environment variable containing the full database URL
    #[arg(short = 'e', long = "env", global = true, default_value = constants::URL_VAR)]
    pub url_var: String,

    /// Environment variable used to look up the host
    #[arg(long, global = true, default_value = constants::HOST_VAR)]
    pub hostvar: String,

    /// Environment variable used to look up the user
    #[arg(long, global = true, default_value = constants::USER_VAR)]
    pub uservar: String,

    /// Environment variable used to look up the password
    #[arg(long, global = true, default_value = constants::PASSWORD_VAR)]
    pub passvar: String,

    /// Environment variable used to look up the driver
    #[arg(long, global = true, default_value = constants::DRIVER_VAR)]
    pub drivervar: String,

    /// Environment variable used to look up the database name
    #[arg(long, global = true, default_value = constants::NAME_VAR)]
    pub dbnamevar: String,

    /// Environment variable used to look up the database port
    #[arg(long, global = true, default_value = constants::PORT_VAR)]
    pub dbportvar: String,

    /// Hostname suffix that marks a DNS-discoverable service (empty disables discovery)
    #[arg(
        long,
        global = true,
        env = "DBWIRE_SERVICE_SUFFIX",
        default_value = constants::SERVICE_SUFFIX
    )]
    pub service_suffix: String,
}

impl From<ResolveArgs> for ResolveConfig {
    fn from(args: ResolveArgs) -> Self {
        Self {
            url_var: args.url_var,
            names: VariableNames {
                host: args.hostvar,
                user: args.uservar,
                password: args.passvar,
                driver: args.drivervar,
                database_name: args.dbnamevar,
                port: args.dbportvar,
            },
            service_suffix: args.service_suffix,
            query_timeout: constants::QUERY_TIMEOUT,
        }
    }
}

/// Settings handed through to the migration engine.
#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Directory containing migration files
    #[arg(short = 'd', long, global = true, default_value = constants::MIGRATIONS_DIR)]
    pub migrations_dir: PathBuf,

    /// Schema file location
    #[arg(short = 's', long, global = true, default_value = constants::SCHEMA_FILE)]
    pub schema_file: PathBuf,

    /// Don't update the schema file on migrate/rollback
    #[arg(long, global = true)]
    pub no_dump_schema: bool,

    /// Path to the dbmate executable (defaults to the one on PATH)
    #[arg(long, global = true, env = "DBWIRE_DBMATE_BIN")]
    pub dbmate_bin: Option<PathBuf>,
}

impl EngineArgs {
    pub fn options(&self) -> EngineOptions {
        EngineOptions {
            migrations_dir: self.migrations_dir.clone(),
            schema_file: self.schema_file.clone(),
            auto_dump_schema: !self.no_dump_schema,
        }
    }
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate a new migration file
    #[command(visible_alias = "n")]
    New {
        /// Migration name
        name: Option<String>,
    },

    /// Create database (if necessary) and migrate to the latest version
    Up,

    /// Create database
    Create,

    /// Drop database (if it exists)
    Drop,

    /// Migrate to the latest version
    Migrate,

    /// Rollback the most recent migration
    #[command(visible_alias = "down")]
    Rollback,

    /// Write the database schema to disk
    Dump,

    /// Wait for the database to become available
    Wait,

    /// Print the resolved database URL
    Url {
        /// Print the password instead of masking it
        #[arg(long)]
        show_password: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Execute a command.
pub fn execute(cli: Cli) -> crate::error::Result<()> {
    use Command::*;

    let config = ResolveConfig::from(cli.resolve);
    let engine = cli.engine;

    match cli.command {
        New { name } => migrate::execute(&config, &engine, Action::New(name.unwrap_or_default())),
        Up => migrate::execute(&config, &engine, Action::Up),
        Create => migrate::execute(&config, &engine, Action::Create),
        Drop => migrate::execute(&config, &engine, Action::Drop),
        Migrate => migrate::execute(&config, &engine, Action::Migrate),
        Rollback => migrate::execute(&config, &engine, Action::Rollback),
        Dump => migrate::execute(&config, &engine, Action::Dump),
        Wait => migrate::execute(&config, &engine, Action::Wait),
        Url {
            show_password,
            json,
        } => resolve::execute(&config, show_password, json),
        Completions { shell } => completions::execute(shell),
    }
}
