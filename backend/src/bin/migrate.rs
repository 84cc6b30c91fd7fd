//! Apply pending schema migrations to the configured database.
//!
//! Connection settings come from `FOLIO_*` environment variables and
//! configuration files, the same sources the services read. Flags given on
//! the command line override them.

use std::ffi::OsString;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::info;

use folio_backend::FolioSettings;
use folio_backend::outbound::persistence::run_pending_migrations;
use folio_backend::telemetry::{self, LogFormat};

/// `folio-migrate` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "folio-migrate",
    about = "Apply pending Folio schema migrations",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `FOLIO_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// `json` or `pretty`. Falls back to `FOLIO_LOG_FORMAT`.
    #[arg(long = "log-format", value_name = "format")]
    log_format: Option<LogFormat>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let mut settings = FolioSettings::load_from_iter([OsString::from("folio-migrate")])
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    if let Some(url) = args.database_url {
        settings.database_url = Some(url);
    }

    let format = match args.log_format {
        Some(format) => format,
        None => settings.log_format()?,
    };
    telemetry::init(format);

    let applied = run_pending_migrations(settings.database_url()?)
        .wrap_err("failed to migrate the folio schema")?;
    if applied.is_empty() {
        info!("schema already up to date");
    } else {
        info!(versions = ?applied, "schema migrated");
    }
    Ok(())
}
