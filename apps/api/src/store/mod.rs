//! Document-store capability and its PostgreSQL implementation.
//!
//! The trait mirrors the small surface the system actually needs — get,
//! merge-set, add, ordered list, array-append — so any conforming document
//! or key/value store suffices. `PgDocumentStore` keeps every document as a
//! JSONB row in a single table.

pub mod local;

pub use local::LocalStore;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("document {0} not found")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Upserts with merge semantics: existing top-level fields not present
    /// in `value` are kept.
    async fn set(&self, collection: &str, id: &str, value: &Value) -> Result<(), StoreError>;

    /// Inserts a new document under a generated id, returned to the caller.
    async fn add(&self, collection: &str, value: &Value) -> Result<String, StoreError>;

    /// All documents of a collection, newest first.
    async fn list_desc(&self, collection: &str) -> Result<Vec<(String, Value)>, StoreError>;

    /// Appends `item` to the array field `field` of one document.
    async fn append(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        item: &Value,
    ) -> Result<(), StoreError>;
}

pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the backing table if needed. Called once at startup.
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection  TEXT        NOT NULL,
                id          TEXT        NOT NULL,
                data        JSONB       NOT NULL,
                created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let data = sqlx::query_scalar::<_, Value>(
            "SELECT data FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(data)
    }

    async fn set(&self, collection: &str, id: &str, value: &Value) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id)
            DO UPDATE SET data = documents.data || EXCLUDED.data
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn add(&self, collection: &str, value: &Value) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(&id)
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn list_desc(&self, collection: &str) -> Result<Vec<(String, Value)>, StoreError> {
        let rows = sqlx::query_as::<_, (String, Value)>(
            "SELECT id, data FROM documents WHERE collection = $1 ORDER BY created_at DESC",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn append(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        item: &Value,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET data = jsonb_set(data, $3, COALESCE(data #> $3, '[]'::jsonb) || $4::jsonb)
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(vec![field.to_string()])
        .bind(item)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("{collection}/{id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory `DocumentStore` used by forum and profile tests.

    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct MemoryDocumentStore {
        // Insertion-ordered; list_desc returns newest first.
        docs: Mutex<Vec<(String, String, Value)>>,
        pub(crate) fail: Mutex<bool>,
    }

    impl MemoryDocumentStore {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        fn check(&self) -> Result<(), StoreError> {
            if *self.fail.lock().unwrap() {
                return Err(StoreError::NotFound("store offline".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl DocumentStore for MemoryDocumentStore {
        async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
            self.check()?;
            let docs = self.docs.lock().unwrap();
            Ok(docs
                .iter()
                .find(|(c, i, _)| c == collection && i == id)
                .map(|(_, _, v)| v.clone()))
        }

        async fn set(&self, collection: &str, id: &str, value: &Value) -> Result<(), StoreError> {
            self.check()?;
            let mut docs = self.docs.lock().unwrap();
            if let Some(slot) = docs
                .iter_mut()
                .find(|(c, i, _)| c == collection && i == id)
            {
                if let (Some(existing), Some(incoming)) =
                    (slot.2.as_object_mut(), value.as_object())
                {
                    for (k, v) in incoming {
                        existing.insert(k.clone(), v.clone());
                    }
                } else {
                    slot.2 = value.clone();
                }
            } else {
                docs.push((collection.to_string(), id.to_string(), value.clone()));
            }
            Ok(())
        }

        async fn add(&self, collection: &str, value: &Value) -> Result<String, StoreError> {
            self.check()?;
            let id = Uuid::new_v4().to_string();
            self.docs.lock().unwrap().push((
                collection.to_string(),
                id.clone(),
                value.clone(),
            ));
            Ok(id)
        }

        async fn list_desc(&self, collection: &str) -> Result<Vec<(String, Value)>, StoreError> {
            self.check()?;
            let docs = self.docs.lock().unwrap();
            Ok(docs
                .iter()
                .rev()
                .filter(|(c, _, _)| c == collection)
                .map(|(_, i, v)| (i.clone(), v.clone()))
                .collect())
        }

        async fn append(
            &self,
            collection: &str,
            id: &str,
            field: &str,
            item: &Value,
        ) -> Result<(), StoreError> {
            self.check()?;
            let mut docs = self.docs.lock().unwrap();
            let slot = docs
                .iter_mut()
                .find(|(c, i, _)| c == collection && i == id)
                .ok_or_else(|| StoreError::NotFound(format!("{collection}/{id}")))?;
            let array = slot
                .2
                .as_object_mut()
                .and_then(|o| {
                    o.entry(field)
                        .or_insert_with(|| Value::Array(vec![]))
                        .as_array_mut()
                })
                .ok_or_else(|| StoreError::NotFound(format!("{collection}/{id}/{field}")))?;
            array.push(item.clone());
            Ok(())
        }
    }
}
