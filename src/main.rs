use std::process::exit;
use std::sync::Arc;
use clap::Parser;
use log::{
    error,
    info,
    warn
};
use tokio::runtime::Builder;
use schemabase::common::common::setup_logging;
use schemabase::config::structs::configuration::Configuration;
use schemabase::database::errors::DatabaseError;
use schemabase::database::structs::driver_context::DriverContext;
use schemabase::database::structs::driver_registry::DriverRegistry;
use schemabase::database::structs::migration_info::MigrationInfo;
use schemabase::database::traits::driver::Driver;
use schemabase::structs::{
    Cli,
    Commands
};

#[tracing::instrument(level = "debug")]
fn main() -> std::io::Result<()>
{
    let args = Cli::parse();
    let command = args.command.clone().unwrap_or(Commands::Ping);

    if let Commands::Parse { filename } = &command {
        match MigrationInfo::parse(filename) {
            Ok(info) => {
                println!("{}", serde_json::to_string_pretty(&info)?);
                return Ok(());
            }
            Err(error) => {
                eprintln!("{}", error);
                exit(1);
            }
        }
    }

    let config = match Configuration::load_from_file(&args.config, args.create_config) {
        Ok(config) => Arc::new(config),
        Err(error) => {
            eprintln!("[ERROR] {}", error);
            exit(101)
        }
    };

    if let Err(error) = setup_logging(&config) {
        eprintln!("[ERROR] {}", error);
        exit(101);
    }

    info!("{} - Version: {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let registry = match DriverRegistry::with_builtins() {
        Ok(registry) => Arc::new(registry),
        Err(error) => {
            error!("[BOOT] Unable to register drivers: {}", error);
            exit(101)
        }
    };
    info!("[BOOT] Registered engines: {:?}", registry.engines());

    let migration = match &command {
        Commands::Migrate { file, creator } => match MigrationInfo::load_file(file) {
            Ok((info, statement)) => {
                let creator = creator.clone().unwrap_or_else(|| config.migration.creator.clone());
                Some((info.with_creator(creator), statement))
            }
            Err(error) => {
                error!("[MIGRATION] {}", error);
                exit(1)
            }
        },
        _ => None,
    };

    let outcome = Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let (shutdown_sender, shutdown_receiver) = tokio::sync::watch::channel(false);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("[BOOT] Interrupt received, cancelling...");
                    let _ = shutdown_sender.send(true);
                }
            });
            let ctx = config.driver_context().with_cancel(shutdown_receiver);

            info!("[BOOT] Opening {} driver...", config.database.engine);
            let driver = registry
                .open(config.database.engine, config.driver.clone(), &config.connection_config(), &ctx)
                .await?;
            let result = run_command(driver.as_ref(), &command, migration.as_ref(), &ctx).await;
            driver.close().await;
            result
        });

    if let Err(error) = outcome {
        error!("{}", error);
        if error.requires_reconciliation() {
            error!("[MIGRATION] The schema changed but the history table was not updated; reconcile before applying further migrations");
        }
        exit(1);
    }
    Ok(())
}

async fn run_command(
    driver: &dyn Driver,
    command: &Commands,
    migration: Option<&(MigrationInfo, String)>,
    ctx: &DriverContext,
) -> Result<(), DatabaseError> {
    match command {
        Commands::Ping => {
            driver.ping(ctx).await?;
            info!("{} Ping OK", driver.engine_type().log_prefix());
        }
        Commands::SyncSchema => {
            let schemas = driver.sync_schema(ctx).await?;
            let json = serde_json::to_string_pretty(&schemas)
                .map_err(|error| DatabaseError::Decode(error.to_string()))?;
            println!("{}", json);
        }
        Commands::Setup => {
            if driver.needs_setup_migration(ctx).await? {
                driver.setup_migration_if_needed(ctx).await?;
                info!("[MIGRATION] History storage created");
            } else {
                info!("[MIGRATION] History storage already present");
            }
        }
        Commands::Migrate { .. } => {
            let Some((info, statement)) = migration else {
                return Ok(());
            };
            driver.setup_migration_if_needed(ctx).await?;
            let applied = driver.find_migration_history(ctx, Some(&info.namespace)).await?;
            if applied.iter().any(|record| record.version == info.version) {
                warn!("[MIGRATION] {} version {} already applied, skipping", info.namespace, info.version);
                return Ok(());
            }
            driver.execute_migration(ctx, info, statement).await?;
        }
        Commands::History { namespace } => {
            let records = driver.find_migration_history(ctx, namespace.as_deref()).await?;
            let json = serde_json::to_string_pretty(&records)
                .map_err(|error| DatabaseError::Decode(error.to_string()))?;
            println!("{}", json);
        }
        Commands::Parse { .. } => {}
    }
    Ok(())
}
