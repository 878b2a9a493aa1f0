//! Hand-off to the migration engine.
//!
//! dbwire never opens a database connection itself. Once the URL is resolved,
//! the requested action runs in an external `dbmate` process. The URL travels
//! through the child's environment rather than its arguments so credentials
//! stay out of process listings.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;
use url::Url;

use crate::core::connection::redact;
use crate::core::constants;
use crate::error::{EngineError, Result};

/// Operations the migration engine performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Generate a new migration file with the given name.
    New(String),
    /// Create the database if needed, then migrate.
    Up,
    Create,
    Drop,
    Migrate,
    Rollback,
    /// Write the schema file.
    Dump,
    /// Block until the database accepts connections.
    Wait,
}

impl Action {
    /// Engine subcommand name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::New(_) => "new",
            Self::Up => "up",
            Self::Create => "create",
            Self::Drop => "drop",
            Self::Migrate => "migrate",
            Self::Rollback => "rollback",
            Self::Dump => "dump",
            Self::Wait => "wait",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Engine settings supplied by the command-line layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    pub migrations_dir: PathBuf,
    pub schema_file: PathBuf,
    pub auto_dump_schema: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            migrations_dir: PathBuf::from(constants::MIGRATIONS_DIR),
            schema_file: PathBuf::from(constants::SCHEMA_FILE),
            auto_dump_schema: true,
        }
    }
}

/// Something that can carry out a migration action against a URL.
pub trait MigrationEngine {
    fn run(&self, url: &Url, options: &EngineOptions, action: &Action) -> Result<()>;
}

/// The `dbmate` executable.
#[derive(Debug, Clone)]
pub struct Dbmate {
    program: PathBuf,
}

impl Dbmate {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Locate `dbmate` on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotFound` if no executable is found.
    pub fn locate() -> Result<Self> {
        let program = which::which(constants::ENGINE_PROGRAM)
            .map_err(|e| EngineError::NotFound(format!("{}: {}", constants::ENGINE_PROGRAM, e)))?;
        Ok(Self::new(program))
    }

    /// Arguments for one invocation, global flags first.
    pub fn args(options: &EngineOptions, action: &Action) -> Result<Vec<String>> {
        let mut args = vec![
            "--env".to_string(),
            constants::URL_VAR.to_string(),
            "--migrations-dir".to_string(),
            options.migrations_dir.display().to_string(),
            "--schema-file".to_string(),
            options.schema_file.display().to_string(),
        ];
        if !options.auto_dump_schema {
            args.push("--no-dump-schema".to_string());
        }

        args.push(action.name().to_string());
        if let Action::New(name) = action {
            if name.is_empty() {
                return Err(EngineError::MissingName.into());
            }
            args.push(name.clone());
        }

        Ok(args)
    }
}

impl MigrationEngine for Dbmate {
    fn run(&self, url: &Url, options: &EngineOptions, action: &Action) -> Result<()> {
        let args = Self::args(options, action)?;
        debug!(
            program = %self.program.display(),
            url = %redact(url),
            ?args,
            "running migration engine"
        );

        let status = Command::new(&self.program)
            .args(&args)
            .env(constants::URL_VAR, url.as_str())
            .status()
            .map_err(|source| EngineError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !status.success() {
            return Err(EngineError::Failed {
                action: action.to_string(),
                code: status.code().unwrap_or(1),
            }
            .into());
        }

        Ok(())
    }
}
