//! Storage backend construction at startup

use anyhow::{bail, Context};
use newsroom_storage::{seed_posts, InMemoryStorage, MongoStorage, PostStorage, PostgresStorage};
use std::sync::Arc;

use crate::{Backend, Cli, Config};

/// Build the selected backend, running the migration or seeder when asked.
///
/// Any failure here is fatal to startup.
pub async fn open_storage(
    backend: Backend,
    cli: &Cli,
    config: &Config,
) -> anyhow::Result<Arc<dyn PostStorage>> {
    if cli.migrate && backend != Backend::Postgres {
        tracing::warn!("--migrate only applies to postgres, ignoring it for {}", backend);
    }
    if cli.seed && backend != Backend::Mongodb {
        tracing::warn!("--seed only applies to mongodb, ignoring it for {}", backend);
    }

    let storage: Arc<dyn PostStorage> = match backend {
        Backend::Memdb => {
            tracing::info!("Initializing in-memory storage...");
            Arc::new(InMemoryStorage::new())
        }
        Backend::Postgres => {
            tracing::info!("Initializing PostgreSQL storage...");
            let store = PostgresStorage::connect(&config.postgres_dsn())
                .await
                .context("Failed to initialize PostgreSQL storage")?;

            if cli.migrate {
                tracing::info!("Running migration {}", cli.schema.display());
                store
                    .migrate(&cli.schema)
                    .await
                    .context("Failed to run migration")?;
            }
            Arc::new(store)
        }
        Backend::Mongodb => {
            tracing::info!("Initializing MongoDB storage...");
            let store = MongoStorage::connect(config.mongo_config())
                .await
                .context("Failed to initialize MongoDB storage")?;

            if cli.seed {
                tracing::info!("Seeding MongoDB with sample posts...");
                let errors = seed_posts(&store).await;
                if !errors.is_empty() {
                    for err in &errors {
                        tracing::error!("{}", err);
                    }
                    store.close().await;
                    bail!("{} sample posts could not be seeded", errors.len());
                }
                tracing::info!("Seeding complete");
            }
            Arc::new(store)
        }
    };

    Ok(storage)
}
