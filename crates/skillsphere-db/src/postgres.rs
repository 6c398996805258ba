//! PostgreSQL [`DocumentStore`] backend.
//!
//! Each collection is a table `(id UUID, doc JSONB, seq BIGSERIAL)`; see
//! `migrations/`. Filters use JSONB containment, sort keys are JSONB paths
//! bound as `text[]` parameters, and `seq` supplies the natural order.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use crate::document::{
    DeleteResult, Document, DocumentId, ID_FIELD, InsertOneResult, UpdateResult, with_id,
};
use crate::store::{
    Collection, DocumentStore, FindQuery, Lookup, SortDirection, SortKey, StoreError,
};

pub static MIGRATOR: Migrator = sqlx::migrate!();

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    doc: Json<Document>,
}

impl DocumentRow {
    fn into_document(self) -> Document {
        with_id(self.id.into(), self.doc.0)
    }
}

#[derive(Debug, FromRow)]
struct JoinedRow {
    id: Uuid,
    doc: Json<Document>,
    joined_id: Option<Uuid>,
    joined_doc: Option<Json<Document>>,
}

#[derive(Clone, Debug)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| StoreError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies pending migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        MIGRATOR.run(&self.pool).await.map_err(|e| StoreError::Query {
            message: format!("migration failed: {e}"),
        })
    }
}

fn map_sqlx_error(collection: Collection, err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::DuplicateKey {
            collection,
            message: db_err.message().to_string(),
        },
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Connection {
            message: err.to_string(),
        },
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => StoreError::Serialization {
            message: err.to_string(),
        },
        _ => StoreError::Query {
            message: err.to_string(),
        },
    }
}

/// `ORDER BY` over `alias.doc`, binding each key path as parameter
/// `$first_param`, `$first_param + 1`, ...
fn order_clause(alias: &str, sort: &[SortKey], first_param: usize) -> String {
    let mut terms: Vec<String> = sort
        .iter()
        .enumerate()
        .map(|(i, key)| {
            let direction = match key.direction {
                SortDirection::Ascending => "ASC NULLS FIRST",
                SortDirection::Descending => "DESC NULLS LAST",
            };
            format!("{alias}.doc #> ${} {direction}", first_param + i)
        })
        .collect();
    terms.push(format!("{alias}.seq ASC"));
    format!(" ORDER BY {}", terms.join(", "))
}

fn limit_clause(limit: Option<u32>) -> String {
    limit.map(|n| format!(" LIMIT {n}")).unwrap_or_default()
}

fn find_sql(collection: Collection, query: &FindQuery) -> String {
    format!(
        "SELECT d.id, d.doc FROM {table} d WHERE d.doc @> $1{order}{limit}",
        table = collection.name(),
        order = order_clause("d", &query.sort, 2),
        limit = limit_clause(query.limit),
    )
}

fn lookup_sql(collection: Collection, query: &FindQuery, lookup: &Lookup) -> String {
    format!(
        "SELECT d.id, d.doc, j.id AS joined_id, j.doc AS joined_doc \
         FROM {table} d LEFT JOIN {from} j ON j.id::text = d.doc->>$2 \
         WHERE d.doc @> $1{order}{limit}",
        table = collection.name(),
        from = lookup.from.name(),
        order = order_clause("d", &query.sort, 3),
        limit = limit_clause(query.limit),
    )
}

fn update_sql(collection: Collection) -> String {
    format!(
        "WITH target AS ( \
             SELECT id, doc FROM {table} WHERE id = $1 FOR UPDATE \
         ), updated AS ( \
             UPDATE {table} AS d SET doc = d.doc || $2 \
             FROM target \
             WHERE d.id = target.id AND target.doc IS DISTINCT FROM target.doc || $2 \
             RETURNING d.id \
         ) \
         SELECT (SELECT COUNT(*) FROM target) AS matched, \
                (SELECT COUNT(*) FROM updated) AS modified",
        table = collection.name(),
    )
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    #[instrument(skip(self), fields(db.system = "postgresql", db.sql.table = %collection))]
    async fn find(
        &self,
        collection: Collection,
        query: FindQuery,
    ) -> Result<Vec<Document>, StoreError> {
        let sql = find_sql(collection, &query);

        let mut statement = sqlx::query_as::<_, DocumentRow>(&sql).bind(Json(&query.filter));
        for key in &query.sort {
            statement = statement.bind(key.segments());
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;

        Ok(rows.into_iter().map(DocumentRow::into_document).collect())
    }

    #[instrument(skip(self), fields(db.system = "postgresql", db.sql.table = %collection))]
    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError> {
        let sql = format!("SELECT id, doc FROM {} WHERE id = $1", collection.name());

        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;

        Ok(row.map(DocumentRow::into_document))
    }

    #[instrument(
        skip(self, document),
        fields(db.system = "postgresql", db.sql.table = %collection)
    )]
    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<InsertOneResult, StoreError> {
        document.remove(ID_FIELD);
        let id = DocumentId::new();
        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", collection.name());

        sqlx::query(&sql)
            .bind(id.as_uuid())
            .bind(Json(&document))
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;

        Ok(InsertOneResult::new(id))
    }

    #[instrument(skip(self, set), fields(db.system = "postgresql", db.sql.table = %collection))]
    async fn update_one(
        &self,
        collection: Collection,
        id: DocumentId,
        mut set: Document,
    ) -> Result<UpdateResult, StoreError> {
        set.remove(ID_FIELD);
        let sql = update_sql(collection);

        let (matched, modified) = sqlx::query_as::<_, (i64, i64)>(&sql)
            .bind(id.as_uuid())
            .bind(Json(&set))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;

        Ok(UpdateResult::new(matched.unsigned_abs(), modified.unsigned_abs()))
    }

    #[instrument(skip(self), fields(db.system = "postgresql", db.sql.table = %collection))]
    async fn delete_one(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<DeleteResult, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", collection.name());

        let result = sqlx::query(&sql)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;

        Ok(DeleteResult::new(result.rows_affected()))
    }

    #[instrument(skip(self), fields(db.system = "postgresql", db.sql.table = %collection))]
    async fn find_with_lookup(
        &self,
        collection: Collection,
        query: FindQuery,
        lookup: Lookup,
    ) -> Result<Vec<Document>, StoreError> {
        let sql = lookup_sql(collection, &query, &lookup);

        let mut statement = sqlx::query_as::<_, JoinedRow>(&sql)
            .bind(Json(&query.filter))
            .bind(&lookup.local_field);
        for key in &query.sort {
            statement = statement.bind(key.segments());
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let mut document = with_id(row.id.into(), row.doc.0);
                if let (Some(joined_id), Some(joined_doc)) = (row.joined_id, row.joined_doc) {
                    document.insert(
                        lookup.as_field.clone(),
                        Value::Object(with_id(joined_id.into(), joined_doc.0)),
                    );
                }
                document
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Connection {
                message: e.to_string(),
            })
    }

    async fn close(&self) {
        tracing::info!("Closing PostgreSQL connection pool");
        self.pool.close().await;
    }
}
