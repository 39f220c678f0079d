//! PostgreSQL-backed [`DocumentStore`].
//!
//! All collections share the `documents` table; each row holds one JSONB
//! body keyed by `(collection, id)`. Equality conditions compile to JSONB
//! containment (`body @> $n`) so the GIN index on `body` serves them.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;

use crate::store::{document_id, Document, DocumentStore, Filter, Sort, StoreError, ID_FIELD};
use crate::DbPool;

/// Document store over a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: DbPool,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Field names are interpolated into SQL, so only plain identifiers pass.
fn check_field(field: &str) -> Result<(), StoreError> {
    if !field.is_empty() && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(StoreError::Malformed(format!("invalid field name '{field}'")))
    }
}

/// Build the `WHERE` clause for `filter`. `$1` is always the collection;
/// containment parameters are numbered from `first_param`.
fn where_clause(
    filter: &Filter,
    first_param: usize,
) -> Result<(String, Vec<Json<Value>>), StoreError> {
    let mut sql = String::from("collection = $1");
    let mut params = Vec::new();

    for (field, value) in filter.conditions() {
        check_field(field)?;
        if value.is_null() {
            sql.push_str(&format!(
                " AND (body->'{field}' IS NULL OR body->'{field}' = 'null'::jsonb)"
            ));
        } else {
            let mut containment = Document::new();
            containment.insert(field.clone(), value.clone());
            sql.push_str(&format!(" AND body @> ${}", first_param + params.len()));
            params.push(Json(Value::Object(containment)));
        }
    }
    Ok((sql, params))
}

fn order_clause(sort: Sort) -> Result<String, StoreError> {
    check_field(sort.field)?;
    let field = sort.field;
    Ok(if sort.descending {
        format!(" ORDER BY (body->>'{field}')::timestamptz DESC NULLS LAST, seq DESC")
    } else {
        format!(" ORDER BY (body->>'{field}')::timestamptz ASC NULLS FIRST, seq ASC")
    })
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_scalar::<_, Json<Document>>(
            "SELECT body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|Json(body)| body))
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        sort: Option<Sort>,
    ) -> Result<Vec<Document>, StoreError> {
        let (predicate, params) = where_clause(filter, 2)?;
        let order = match sort {
            Some(sort) => order_clause(sort)?,
            None => " ORDER BY seq ASC".to_string(),
        };
        let sql = format!("SELECT body FROM documents WHERE {predicate}{order}");

        let mut query = sqlx::query_scalar::<_, Json<Document>>(&sql).bind(collection);
        for param in &params {
            query = query.bind(param);
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|Json(body)| body).collect())
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        let id = document_id(&document)?.to_string();
        let result = sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(&id)
            .bind(Json(&document))
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::DuplicateId {
                    collection: collection.to_string(),
                    id,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn update(
        &self,
        collection: &str,
        filter: &Filter,
        mut set: Document,
    ) -> Result<u64, StoreError> {
        set.remove(ID_FIELD);
        let (predicate, params) = where_clause(filter, 3)?;
        let sql = format!("UPDATE documents SET body = body || $2 WHERE {predicate}");

        let mut query = sqlx::query(&sql).bind(collection).bind(Json(&set));
        for param in &params {
            query = query.bind(param);
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let (predicate, params) = where_clause(filter, 2)?;
        let sql = format!("DELETE FROM documents WHERE {predicate}");

        let mut query = sqlx::query(&sql).bind(collection);
        for param in &params {
            query = query.bind(param);
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
