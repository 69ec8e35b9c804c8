//! PostgreSQL document store. Each collection is a table `(id UUID, doc JSONB)` in the
//! schema named by `DATABASE_NAME`.

use super::{DocumentStore, StoredDocument};
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    schema: String,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        Self {
            pool,
            schema: schema.into(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn table(&self, collection: &str) -> String {
        qualified_table(&self.schema, collection)
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn qualified_table(schema: &str, collection: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(collection))
}

fn to_document((id, doc): (Uuid, Value)) -> Result<StoredDocument, StoreError> {
    let fields: Map<String, Value> = serde_json::from_value(doc)?;
    Ok(StoredDocument { id, fields })
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let sql = format!("SELECT id, doc FROM {}", self.table(collection));
        let rows: Vec<(Uuid, Value)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(to_document).collect()
    }

    async fn find_one(&self, collection: &str, id: Uuid) -> Result<Option<StoredDocument>, StoreError> {
        let sql = format!("SELECT id, doc FROM {} WHERE id = $1", self.table(collection));
        let row: Option<(Uuid, Value)> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(to_document).transpose()
    }

    async fn insert_one(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<StoredDocument, StoreError> {
        let id = Uuid::new_v4();
        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", self.table(collection));
        sqlx::query(&sql)
            .bind(id)
            .bind(Value::Object(fields.clone()))
            .execute(&self.pool)
            .await?;
        Ok(StoredDocument { id, fields })
    }

    async fn update_one(
        &self,
        collection: &str,
        id: Uuid,
        set: Map<String, Value>,
    ) -> Result<Option<StoredDocument>, StoreError> {
        // jsonb `||` replaces top-level keys present on the right and keeps the rest.
        let sql = format!(
            "UPDATE {} SET doc = doc || $2, updated_at = NOW() WHERE id = $1 RETURNING id, doc",
            self.table(collection)
        );
        let row: Option<(Uuid, Value)> = sqlx::query_as(&sql)
            .bind(id)
            .bind(Value::Object(set))
            .fetch_optional(&self.pool)
            .await?;
        row.map(to_document).transpose()
    }

    async fn delete_one(&self, collection: &str, id: Uuid) -> Result<Option<StoredDocument>, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING id, doc", self.table(collection));
        let row: Option<(Uuid, Value)> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(to_document).transpose()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Create the schema and one table per collection if they do not exist.
pub async fn ensure_collections(pool: &PgPool, schema: &str, collections: &[&str]) -> Result<(), StoreError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
        .execute(pool)
        .await?;
    for collection in collections {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id UUID PRIMARY KEY,
                doc JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            qualified_table(schema, collection)
        );
        sqlx::query(&ddl).execute(pool).await?;
        tracing::debug!(schema, collection, "collection ready");
    }
    Ok(())
}

/// Connect to the server's `postgres` database and create the database named in
/// `database_url` when it is missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), StoreError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| StoreError::Unavailable("DATABASE_URL: no database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_table_quotes_both_parts() {
        assert_eq!(qualified_table("dev", "users"), "\"dev\".\"users\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn parses_database_name() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/customers?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "customers");
    }

    #[test]
    fn url_without_path_is_rejected() {
        assert!(parse_db_name_from_url("postgres://localhost").is_err());
    }
}
