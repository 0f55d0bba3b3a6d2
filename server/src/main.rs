mod config;
mod employees;
mod http;
mod seed;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbPool, SeaOrmEmployeeStore, connect};
use platform_obs::{ObsConfig, init_tracing};
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "employee-server", version, about = "Employee directory HAL API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Insert the sample employees.
    Seed,
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
    #[arg(long, help = "Apply pending migrations before serving")]
    migrate: bool,
    #[arg(long, help = "Allow starting even when migrations are pending")]
    allow_dirty: bool,
    #[arg(long, help = "Skip preloading sample employees")]
    no_seed: bool,
}

impl From<&ServeCommand> for ServeConfig {
    fn from(value: &ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(ObsConfig::from_env())?;
    let cli = Cli::parse();
    let settings = DatabaseSettings::from_env()?;
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, settings).await,
        Command::Migrate(action) => match action {
            MigrateCommand::Up => migrate_up(&settings).await,
            MigrateCommand::Down => migrate_down(&settings).await,
        },
        Command::Seed => run_seed(&settings).await,
    }
}

async fn setup_pool(settings: &DatabaseSettings) -> Result<DbPool> {
    connect(settings).await.context("failed to connect to database")
}

async fn run_server(cmd: ServeCommand, settings: DatabaseSettings) -> Result<()> {
    let config = Arc::new(AppConfig::load()?);
    let pool = setup_pool(&settings).await?;
    if cmd.migrate || settings.is_in_memory() {
        Migrator::up(&pool, None).await?;
        info!("database migrations applied");
    } else {
        ensure_migrations(&pool, cmd.allow_dirty).await?;
    }
    if config.seed_on_startup && !cmd.no_seed {
        let store = SeaOrmEmployeeStore::new(pool.clone());
        seed::preload_if_empty(&store).await?;
    }
    let state = AppState::new(pool, config);
    http::serve((&cmd).into(), state).await
}

async fn ensure_migrations(pool: &DbPool, allow_dirty: bool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(pool).await?;
    if pending.is_empty() {
        return Ok(());
    }
    if !allow_dirty {
        anyhow::bail!(
            "pending migrations detected; run `employee-server migrate up`, pass --migrate or --allow-dirty"
        );
    }
    warn!(pending = pending.len(), "starting with pending migrations");
    Ok(())
}

async fn run_seed(settings: &DatabaseSettings) -> Result<()> {
    let pool = setup_pool(settings).await?;
    Migrator::up(&pool, None).await?;
    let store = SeaOrmEmployeeStore::new(pool);
    let saved = seed::preload(&store).await?;
    info!(count = saved.len(), "sample employees inserted");
    Ok(())
}

async fn migrate_up(settings: &DatabaseSettings) -> Result<()> {
    let pool = setup_pool(settings).await?;
    Migrator::up(&pool, None).await?;
    info!("database migrations applied");
    Ok(())
}

async fn migrate_down(settings: &DatabaseSettings) -> Result<()> {
    let pool = setup_pool(settings).await?;
    Migrator::down(&pool, Some(1)).await?;
    info!("most recent migration rolled back");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_flags_parse() {
        let cli = Cli::try_parse_from([
            "employee-server",
            "serve",
            "--port",
            "9090",
            "--migrate",
            "--no-seed",
        ])
        .unwrap();
        let Command::Serve(cmd) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(cmd.port, 9090);
        assert!(cmd.migrate && cmd.no_seed && !cmd.allow_dirty);
    }
}
