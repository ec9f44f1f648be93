//! Migrate command - applies or reverts the PostgreSQL schema

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::{
    connect_pool, revert_blog_migrations, run_blog_migrations, PostgresMigrator, StorageConfig,
};

#[derive(Args, Debug, Clone, Default)]
pub struct MigrateArgs {
    /// Revert every applied migration instead of applying pending ones
    #[arg(long, conflicts_with = "status")]
    pub revert: bool,

    /// Only print the applied migration versions
    #[arg(long)]
    pub status: bool,
}

/// Run migrations against the configured database
pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;

    let StorageConfig::Postgres(pg_config) = config.storage.to_storage_config()? else {
        anyhow::bail!("migrate requires storage.backend = \"postgres\"");
    };

    let pool = connect_pool(&pg_config).await?;

    if args.status {
        let migrator = PostgresMigrator::new(pool);
        let current = migrator.current_version().await?;
        let versions = migrator.applied_versions().await?;
        info!(?current, ?versions, "Applied migrations");
        return Ok(());
    }

    if args.revert {
        revert_blog_migrations(&pool).await?;
        info!("Migrations reverted");
    } else {
        run_blog_migrations(&pool).await?;
        info!("Migrations applied");
    }

    Ok(())
}
