//! Engine commands.
//!
//! `new`, `up`, `create`, `drop`, `migrate`, `rollback`, `dump` and `wait`
//! all resolve the URL first and then hand the action to dbmate.

use tracing::debug;

use crate::cli::output;
use crate::cli::EngineArgs;
use crate::core::config::ResolveConfig;
use crate::core::connection::{database_url, redact};
use crate::core::discovery::HickoryResolver;
use crate::core::engine::{Action, Dbmate, MigrationEngine};
use crate::core::env::ProcessEnv;
use crate::error::Result;

/// Resolve the database URL and run `action` through the engine.
pub fn execute(config: &ResolveConfig, args: &EngineArgs, action: Action) -> Result<()> {
    let url = database_url(config, &ProcessEnv, &HickoryResolver::new())?;
    debug!(url = %redact(&url), %action, "database url resolved");

    let engine = match &args.dbmate_bin {
        Some(program) => Dbmate::new(program),
        None => Dbmate::locate()?,
    };
    engine.run(&url, &args.options(), &action)?;

    output::success(&format!("{} complete", action));
    Ok(())
}
