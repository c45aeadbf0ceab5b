//! PostgreSQL storage implementation
//!
//! Posts live in a `posts` table joined to `authors` on read. The pool is
//! owned by the storage instance; nothing is shared through globals.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use newsroom_core::{unix_now, Post, PostUpdate};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, QueryBuilder, Row};

use crate::{PostStorage, StorageError};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
const MIGRATION_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL storage for posts
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    /// Open a connection pool against `dsn`
    pub async fn connect(dsn: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(dsn)
            .await
            .map_err(|e| StorageError::Connection(format!("Failed to connect to PostgreSQL: {}", e)))?;

        tracing::info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run the SQL script at `script` against the pool.
    ///
    /// The script is executed as-is; whether re-running it succeeds depends
    /// on the script itself.
    pub async fn migrate(&self, script: impl AsRef<Path>) -> Result<(), StorageError> {
        let path = script.as_ref();
        let sql = tokio::fs::read_to_string(path).await.map_err(|e| {
            StorageError::Migration(format!("Failed to read {}: {}", path.display(), e))
        })?;

        tokio::time::timeout(MIGRATION_TIMEOUT, sqlx::raw_sql(&sql).execute(&self.pool))
            .await
            .map_err(|_| {
                StorageError::Migration(format!("Timed out after {:?}", MIGRATION_TIMEOUT))
            })?
            .map_err(|e| StorageError::Migration(e.to_string()))?;

        tracing::info!("Applied migration script {}", path.display());
        Ok(())
    }
}

fn query_error(context: &str) -> impl FnOnce(sqlx::Error) -> StorageError + '_ {
    move |e| StorageError::Query(format!("{}: {}", context, e))
}

fn row_to_post(row: &PgRow) -> Result<Post, sqlx::Error> {
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        author_id: row.try_get("author_id")?,
        author_name: row.try_get("author_name")?,
        created_at: row.try_get("created_at")?,
        published_at: row.try_get("published_at")?,
    })
}

/// Build an `UPDATE` touching only the columns set in `update`
fn build_update(update: &PostUpdate) -> Result<QueryBuilder<'static, Postgres>, StorageError> {
    if update.is_empty() {
        return Err(StorageError::NoFieldsToUpdate);
    }

    let mut builder = QueryBuilder::new("UPDATE posts SET ");
    {
        let mut columns = builder.separated(", ");
        if let Some(title) = &update.title {
            columns.push("title = ");
            columns.push_bind_unseparated(title.clone());
        }
        if let Some(content) = &update.content {
            columns.push("content = ");
            columns.push_bind_unseparated(content.clone());
        }
        if let Some(author_id) = update.author_id {
            columns.push("author_id = ");
            columns.push_bind_unseparated(author_id);
        }
        if let Some(created_at) = update.created_at {
            columns.push("created_at = ");
            columns.push_bind_unseparated(created_at);
        }
        if let Some(published_at) = update.published_at {
            columns.push("published_at = ");
            columns.push_bind_unseparated(published_at);
        }
    }
    builder.push(" WHERE id = ").push_bind(update.id);

    Ok(builder)
}

#[async_trait]
impl PostStorage for PostgresStorage {
    async fn list(&self) -> Result<Vec<Post>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.title, p.content, p.author_id, a.name AS author_name,
                   p.created_at, p.published_at
            FROM posts p
            JOIN authors a ON p.author_id = a.id
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_error("Failed to list posts"))?;

        rows.iter()
            .map(row_to_post)
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_error("Failed to read post row"))
    }

    async fn add(&self, post: Post) -> Result<(), StorageError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(query_error("Failed to start transaction"))?;

        // FOR SHARE keeps the author from being deleted before the insert commits
        let author = sqlx::query_scalar::<_, i64>("SELECT id FROM authors WHERE id = $1 FOR SHARE")
            .bind(post.author_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(query_error("Failed to check author"))?;

        if author.is_none() {
            return Err(StorageError::AuthorNotFound(post.author_id));
        }

        sqlx::query(
            r#"
            INSERT INTO posts (title, content, author_id, created_at, published_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(post.title)
        .bind(post.content)
        .bind(post.author_id)
        .bind(unix_now())
        .bind(post.published_at)
        .execute(&mut *tx)
        .await
        .map_err(query_error("Failed to add post"))?;

        tx.commit()
            .await
            .map_err(query_error("Failed to commit post"))?;

        tracing::debug!("Added post for author {}", post.author_id);
        Ok(())
    }

    async fn update(&self, post: Post) -> Result<(), StorageError> {
        let mut builder = build_update(&PostUpdate::from(&post))?;

        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(query_error("Failed to update post"))?;

        tracing::debug!("Updated post {}", post.id);
        Ok(())
    }

    async fn delete(&self, post: Post) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post.id)
            .execute(&self.pool)
            .await
            .map_err(query_error("Failed to delete post"))?;

        tracing::debug!("Deleted post {}", post.id);
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Closed PostgreSQL pool");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_with_only_title() {
        let update = PostUpdate {
            id: 7,
            title: Some("New".to_string()),
            ..PostUpdate::default()
        };
        let builder = build_update(&update).unwrap();
        assert_eq!(builder.sql(), "UPDATE posts SET title = $1 WHERE id = $2");
    }

    #[test]
    fn test_update_with_every_column() {
        let update = PostUpdate {
            id: 7,
            title: Some("t".to_string()),
            content: Some("c".to_string()),
            author_id: Some(2),
            created_at: Some(100),
            published_at: Some(200),
        };
        let builder = build_update(&update).unwrap();
        assert_eq!(
            builder.sql(),
            "UPDATE posts SET title = $1, content = $2, author_id = $3, \
             created_at = $4, published_at = $5 WHERE id = $6"
        );
    }

    #[test]
    fn test_update_skips_unset_columns_between_set_ones() {
        let update = PostUpdate {
            id: 1,
            content: Some("c".to_string()),
            created_at: Some(5),
            ..PostUpdate::default()
        };
        let builder = build_update(&update).unwrap();
        assert_eq!(
            builder.sql(),
            "UPDATE posts SET content = $1, created_at = $2 WHERE id = $3"
        );
    }

    #[test]
    fn test_update_without_fields_is_rejected() {
        let update = PostUpdate {
            id: 1,
            ..PostUpdate::default()
        };
        assert!(matches!(
            build_update(&update),
            Err(StorageError::NoFieldsToUpdate)
        ));
    }

    // The tests below need a live database:
    // DATABASE_URL=postgres://... cargo test -p newsroom-storage --features postgres -- --ignored

    async fn live_storage() -> PostgresStorage {
        let dsn = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let storage = PostgresStorage::connect(&dsn).await.unwrap();
        storage
            .migrate(concat!(env!("CARGO_MANIFEST_DIR"), "/../schema.sql"))
            .await
            .unwrap();
        storage
    }

    fn unique_title(prefix: &str) -> String {
        format!("{}-{}-{}", prefix, std::process::id(), unix_now())
    }

    #[tokio::test]
    #[ignore]
    async fn test_update_title_keeps_other_columns() {
        let storage = live_storage().await;
        let title = unique_title("pg-update");
        storage
            .add(Post::new(title.clone(), "original content", 1))
            .await
            .unwrap();

        let before = storage
            .list()
            .await
            .unwrap()
            .into_iter()
            .find(|p| p.title == title)
            .unwrap();

        let renamed = format!("{}-renamed", title);
        storage
            .update(Post {
                id: before.id,
                title: renamed.clone(),
                ..Post::default()
            })
            .await
            .unwrap();

        let after = storage
            .list()
            .await
            .unwrap()
            .into_iter()
            .find(|p| p.id == before.id)
            .unwrap();

        assert_eq!(after.title, renamed);
        assert_eq!(after.content, before.content);
        assert_eq!(after.author_id, before.author_id);
        assert_eq!(after.created_at, before.created_at);

        storage.delete(after).await.unwrap();
    }

    #[tokio::test]
    #[ignore]
    async fn test_add_with_unknown_author_inserts_nothing() {
        let storage = live_storage().await;
        let before = storage.list().await.unwrap().len();

        let err = storage
            .add(Post::new("orphan", "content", 987_654_321))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::AuthorNotFound(987_654_321)));

        assert_eq!(storage.list().await.unwrap().len(), before);
    }
}
