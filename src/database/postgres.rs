use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, Row};
use tracing::{debug, info};

use super::collection::Collection;
use super::filter::{Document, Filter, FilterOp, ID_FIELD};
use super::object_id::ObjectId;
use super::store::{DocumentStore, StoreError, UpdateResult};
use crate::config::DatabaseConfig;

/// Document store backed by one JSONB table per collection.
///
/// Rows are `(id CHAR(24), doc JSONB, seq BIGSERIAL)`; `seq` provides the
/// insertion order that `find`, `update_one` and `delete_one` rely on.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

enum SqlParam {
    Text(String),
    Json(Value),
}

struct WhereClause {
    sql: String,
    params: Vec<SqlParam>,
}

impl PgDocumentStore {
    /// Open the shared pool. Called once at startup; the handle is then cloned into request state.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| StoreError::ConnectionError("DATABASE_URL is not set".to_string()))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?;

        info!("Created database pool (max_connections={})", config.max_connections);
        Ok(Self { pool })
    }

    /// Create the backing table of every collection if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for collection in Collection::ALL {
            let sql = format!(
                "CREATE TABLE IF NOT EXISTS \"{}\" (
                    id CHAR(24) PRIMARY KEY,
                    doc JSONB NOT NULL,
                    seq BIGSERIAL NOT NULL
                )",
                collection.table()
            );
            sqlx::query(&sql).execute(&self.pool).await?;
            debug!("Ensured table {} for collection {}", collection.table(), collection);
        }
        Ok(())
    }

    fn build_where(filter: &Filter, first_param: usize) -> WhereClause {
        let mut params = Vec::new();
        let mut conditions = Vec::new();

        for condition in &filter.conditions {
            let next = first_param + params.len();
            if condition.field == ID_FIELD {
                let Value::String(id) = &condition.value else {
                    // Identifiers are always strings; a non-string never matches.
                    conditions.push(match condition.op {
                        FilterOp::Eq => "FALSE".to_string(),
                        FilterOp::Ne => "TRUE".to_string(),
                    });
                    continue;
                };
                let op = match condition.op {
                    FilterOp::Eq => "=",
                    FilterOp::Ne => "<>",
                };
                conditions.push(format!("id {} ${}", op, next));
                params.push(SqlParam::Text(id.clone()));
            } else {
                let op = match condition.op {
                    FilterOp::Eq => "=",
                    FilterOp::Ne => "<>",
                };
                conditions.push(format!(
                    "COALESCE(doc -> ${}::text, 'null'::jsonb) {} ${}::jsonb",
                    next,
                    op,
                    next + 1
                ));
                params.push(SqlParam::Text(condition.field.clone()));
                params.push(SqlParam::Json(condition.value.clone()));
            }
        }

        let sql = if conditions.is_empty() {
            "1=1".to_string()
        } else {
            conditions.join(" AND ")
        };
        WhereClause { sql, params }
    }

    fn row_to_document(collection: Collection, row: &PgRow) -> Result<Document, StoreError> {
        let id: String = row.try_get("id")?;
        let doc: Value = row.try_get("doc")?;
        let Value::Object(mut map) = doc else {
            return Err(StoreError::CorruptDocument {
                collection: collection.name(),
                message: format!("document {} is not a JSON object", id.trim()),
            });
        };
        map.insert(ID_FIELD.to_string(), Value::String(id.trim().to_string()));
        Ok(map)
    }

    fn strip_id(mut doc: Document) -> Value {
        doc.remove(ID_FIELD);
        Value::Object(doc)
    }
}

fn bind_param<'q>(
    q: sqlx::query::Query<'q, Postgres, PgArguments>,
    p: &'q SqlParam,
) -> sqlx::query::Query<'q, Postgres, PgArguments> {
    match p {
        SqlParam::Text(s) => q.bind(s),
        SqlParam::Json(v) => q.bind(v),
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let clause = Self::build_where(filter, 1);
        let sql = format!(
            "SELECT id, doc FROM \"{}\" WHERE {} ORDER BY seq",
            collection.table(),
            clause.sql
        );

        let mut q = sqlx::query(&sql);
        for p in clause.params.iter() {
            q = bind_param(q, p);
        }
        let rows = q.fetch_all(&self.pool).await?;
        rows.iter().map(|row| Self::row_to_document(collection, row)).collect()
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>, StoreError> {
        let clause = Self::build_where(filter, 1);
        let sql = format!(
            "SELECT id, doc FROM \"{}\" WHERE {} ORDER BY seq LIMIT 1",
            collection.table(),
            clause.sql
        );

        let mut q = sqlx::query(&sql);
        for p in clause.params.iter() {
            q = bind_param(q, p);
        }
        match q.fetch_optional(&self.pool).await? {
            Some(row) => Ok(Some(Self::row_to_document(collection, &row)?)),
            None => Ok(None),
        }
    }

    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<ObjectId, StoreError> {
        let id = ObjectId::new();
        let sql = format!("INSERT INTO \"{}\" (id, doc) VALUES ($1, $2)", collection.table());
        sqlx::query(&sql)
            .bind(id.to_hex())
            .bind(Self::strip_id(doc))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn insert_many(&self, collection: Collection, docs: Vec<Document>) -> Result<Vec<ObjectId>, StoreError> {
        let sql = format!("INSERT INTO \"{}\" (id, doc) VALUES ($1, $2)", collection.table());
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(docs.len());
        for doc in docs {
            let id = ObjectId::new();
            sqlx::query(&sql)
                .bind(id.to_hex())
                .bind(Self::strip_id(doc))
                .execute(&mut *tx)
                .await?;
            ids.push(id);
        }
        tx.commit().await?;
        Ok(ids)
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        set: Document,
    ) -> Result<UpdateResult, StoreError> {
        let clause = Self::build_where(filter, 1);
        let set_param = SqlParam::Json(Self::strip_id(set));
        let set_index = clause.params.len() + 1;
        let table = collection.table();
        let sql = format!(
            "WITH target AS (
                SELECT id, doc FROM \"{table}\" WHERE {where_sql} ORDER BY seq LIMIT 1 FOR UPDATE
            )
            UPDATE \"{table}\" SET doc = target.doc || ${set_index}::jsonb
            FROM target
            WHERE \"{table}\".id = target.id
            RETURNING (target.doc IS DISTINCT FROM target.doc || ${set_index}::jsonb) AS modified",
            table = table,
            where_sql = clause.sql,
            set_index = set_index,
        );

        let mut q = sqlx::query(&sql);
        for p in clause.params.iter() {
            q = bind_param(q, p);
        }
        q = bind_param(q, &set_param);

        match q.fetch_optional(&self.pool).await? {
            Some(row) => {
                let modified: bool = row.try_get("modified")?;
                Ok(UpdateResult {
                    matched_count: 1,
                    modified_count: u64::from(modified),
                })
            }
            None => Ok(UpdateResult::default()),
        }
    }

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError> {
        let clause = Self::build_where(filter, 1);
        let table = collection.table();
        let sql = format!(
            "DELETE FROM \"{table}\" WHERE id = (
                SELECT id FROM \"{table}\" WHERE {where_sql} ORDER BY seq LIMIT 1
            )",
            table = table,
            where_sql = clause.sql,
        );

        let mut q = sqlx::query(&sql);
        for p in clause.params.iter() {
            q = bind_param(q, p);
        }
        let result = q.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_renders_tautology() {
        let clause = PgDocumentStore::build_where(&Filter::new(), 1);
        assert_eq!(clause.sql, "1=1");
        assert!(clause.params.is_empty());
    }

    #[test]
    fn id_conditions_use_the_id_column() {
        let id = ObjectId::parse("507f1f77bcf86cd799439011").unwrap();
        let clause = PgDocumentStore::build_where(&Filter::by_id(id), 1);
        assert_eq!(clause.sql, "id = $1");
        assert_eq!(clause.params.len(), 1);
    }

    #[test]
    fn field_conditions_number_params_sequentially() {
        let filter = Filter::new()
            .eq("email", "a@b.com")
            .ne(ID_FIELD, "507f1f77bcf86cd799439011");
        let clause = PgDocumentStore::build_where(&filter, 1);
        assert_eq!(
            clause.sql,
            "COALESCE(doc -> $1::text, 'null'::jsonb) = $2::jsonb AND id <> $3"
        );
        assert_eq!(clause.params.len(), 3);
    }

    #[test]
    fn non_string_id_never_matches() {
        let filter = Filter::new().eq(ID_FIELD, 42);
        let clause = PgDocumentStore::build_where(&filter, 1);
        assert_eq!(clause.sql, "FALSE");
        assert!(clause.params.is_empty());
    }
}
