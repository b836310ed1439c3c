use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{types::Json, PgPool};

use crate::database::manager::DatabaseError;
use crate::database::repository::{not_found, Document, Repository};
use crate::filter::filter_order::FilterOrder;
use crate::filter::filter_where::FilterWhere;
use crate::filter::{Filter, Page, Sort};

/// Repository over a `(id, seq, doc JSONB)` table named after `T::COLLECTION`.
pub struct PgRepository<T> {
    pool: PgPool,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: Document> PgRepository<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }

    fn table() -> String {
        format!("\"{}\"", T::COLLECTION)
    }
}

/// Turns unique-index violations into conflicts; everything else passes through.
fn map_write_error(error: sqlx::Error) -> DatabaseError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            DatabaseError::Conflict(db.constraint().unwrap_or("unique constraint").to_string())
        }
        _ => DatabaseError::Sqlx(error),
    }
}

#[async_trait]
impl<T: Document> Repository<T> for PgRepository<T> {
    async fn find_one(&self, id: &str) -> Result<T, DatabaseError> {
        let sql = format!("SELECT \"doc\" FROM {} WHERE \"id\" = $1", Self::table());
        sqlx::query_scalar::<_, Json<T>>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(|Json(doc)| doc)
            .ok_or_else(|| not_found::<T>(id))
    }

    async fn find(&self, ids: &[String]) -> Result<Vec<T>, DatabaseError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let sql = format!("SELECT \"doc\" FROM {} WHERE \"id\" = ANY($1)", Self::table());
        let rows = sqlx::query_scalar::<_, Json<T>>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn find_all(&self) -> Result<Vec<T>, DatabaseError> {
        let sql = format!("SELECT \"doc\" FROM {} {}", Self::table(), FilterOrder::generate(None));
        let rows = sqlx::query_scalar::<_, Json<T>>(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn search(&self, filter: &Filter, page: Page, sort: Option<&Sort>) -> Result<Vec<T>, DatabaseError> {
        let where_sql = FilterWhere::generate(filter, 0);
        let mut sql = format!(
            "SELECT \"doc\" FROM {} WHERE {} {}",
            Self::table(),
            where_sql.query,
            FilterOrder::generate(sort)
        );

        let mut index = where_sql.params.len();
        index += 1;
        sql.push_str(&format!(" OFFSET ${index}"));
        if !page.is_unbounded() {
            index += 1;
            sql.push_str(&format!(" LIMIT ${index}"));
        }
        tracing::debug!("Search {}: {}", T::COLLECTION, sql);

        let mut query = sqlx::query_scalar::<_, Json<T>>(&sql);
        for param in where_sql.params {
            query = query.bind(Json(param));
        }
        query = query.bind(page.offset);
        if !page.is_unbounded() {
            query = query.bind(page.limit);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn upsert(&self, id: &str, value: &T) -> Result<(), DatabaseError> {
        let sql = format!(
            "INSERT INTO {} (\"id\", \"doc\") VALUES ($1, $2) \
             ON CONFLICT (\"id\") DO UPDATE SET \"doc\" = EXCLUDED.\"doc\"",
            Self::table()
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(Json(value))
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<T, DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE \"id\" = $1 RETURNING \"doc\"", Self::table());
        sqlx::query_scalar::<_, Json<T>>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(|Json(doc)| doc)
            .ok_or_else(|| not_found::<T>(id))
    }
}
