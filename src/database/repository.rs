use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::database::manager::DatabaseError;
use crate::filter::{Filter, Page, Sort};

/// A record stored as one JSON document per id.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    /// Table (or collection) name. Must be a plain identifier.
    const COLLECTION: &'static str;

    /// Attributes no two documents may share.
    const UNIQUE: &'static [&'static str] = &[];

    fn id(&self) -> &str;
}

/// Keyed document store for one entity type.
#[async_trait]
pub trait Repository<T: Document>: Send + Sync {
    async fn find_one(&self, id: &str) -> Result<T, DatabaseError>;

    /// Batch lookup. Missing ids are skipped and the result order is unspecified.
    async fn find(&self, ids: &[String]) -> Result<Vec<T>, DatabaseError>;

    async fn find_all(&self) -> Result<Vec<T>, DatabaseError>;

    async fn search(&self, filter: &Filter, page: Page, sort: Option<&Sort>) -> Result<Vec<T>, DatabaseError>;

    /// Create-or-replace keyed by `id`.
    async fn upsert(&self, id: &str, value: &T) -> Result<(), DatabaseError>;

    /// Removes the record and returns its last stored state.
    async fn delete(&self, id: &str) -> Result<T, DatabaseError>;
}

pub(crate) fn not_found<T: Document>(id: &str) -> DatabaseError {
    DatabaseError::NotFound(format!("{} record {} not found", T::COLLECTION, id))
}
