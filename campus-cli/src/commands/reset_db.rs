//! Drop every campus table. Data is lost; the next `serve` recreates the schema.

use anyhow::{bail, Context, Result};
use clap::Parser;

use campus_api::db::{create_pool_with_options, migrations};

use crate::config::DatabaseArgs;

/// Arguments for the reset-db command
#[derive(Parser, Debug)]
pub struct ResetDbArgs {
    /// Confirm that all data should be destroyed
    #[arg(long)]
    pub yes: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

pub async fn run_reset_db(args: ResetDbArgs) -> Result<()> {
    if !args.yes {
        bail!("refusing to drop all tables without --yes");
    }

    let pool = create_pool_with_options(&args.db.database_url, &args.db.pool_config())
        .await
        .context("Failed to create database pool")?;

    migrations::drop_all(&pool)
        .await
        .context("Failed to drop tables")?;

    tracing::info!("All tables dropped");
    pool.close().await;
    Ok(())
}
