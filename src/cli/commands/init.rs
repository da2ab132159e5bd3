use crate::cli::parser::Cli;
use crate::config::{Backend, Config};
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::path::ensure_parent_dir;
use std::path::Path;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database and its pending migrations, when that backend is active
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    info("Initializing fieldtrack…");
    cfg.init_all(cli.test)?;

    match cfg.backend {
        Backend::Sqlite => {
            ensure_parent_dir(Path::new(&cfg.database))?;
            let pool = DbPool::new(&cfg.database)?;
            let applied = init_db(&pool)?;
            if applied == 0 {
                info("Schema already up to date");
            }
            success(format!("Database initialized at {}", cfg.database));
        }
        Backend::Rest => {
            // Remote schema is managed on the hosted side.
            info(format!("Using remote store at {}", cfg.rest.url));
        }
    }

    Ok(())
}
