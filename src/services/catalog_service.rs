use std::sync::Arc;

use uuid::Uuid;

use crate::database::{Document, Repository};
use crate::filter::{Filter, Page, Sort};
use crate::services::ServiceResult;

/// Shared catalog record (card, group, idol, collection).
pub trait CatalogEntry: Document {
    /// Singular name used in log lines.
    const KIND: &'static str;

    fn set_id(&mut self, id: String);

    /// Canonicalizes display names before storage.
    fn normalize(&mut self);
}

/// CRUD over one catalog collection.
pub struct CatalogService<T: CatalogEntry> {
    repository: Arc<dyn Repository<T>>,
    sort: Option<Sort>,
}

impl<T: CatalogEntry> Clone for CatalogService<T> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            sort: self.sort.clone(),
        }
    }
}

impl<T: CatalogEntry> CatalogService<T> {
    pub fn new(repository: Arc<dyn Repository<T>>) -> Self {
        Self { repository, sort: None }
    }

    /// Orders `search` results by `sort`.
    pub fn sorted_by(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub async fn list(&self) -> ServiceResult<Vec<T>> {
        match &self.sort {
            None => Ok(self.repository.find_all().await?),
            Some(sort) => Ok(self.repository.search(&Filter::new(), Page::default(), Some(sort)).await?),
        }
    }

    pub async fn search(&self, filter: &Filter, page: Page) -> ServiceResult<Vec<T>> {
        Ok(self.repository.search(filter, page, self.sort.as_ref()).await?)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<T> {
        Ok(self.repository.find_one(id).await?)
    }

    pub async fn create(&self, mut entry: T) -> ServiceResult<T> {
        entry.set_id(Uuid::new_v4().to_string());
        entry.normalize();
        self.repository.upsert(entry.id(), &entry).await?;
        tracing::info!("Created {} {}", T::KIND, entry.id());
        Ok(entry)
    }

    /// Full replace of an existing entry.
    pub async fn update(&self, id: &str, mut entry: T) -> ServiceResult<T> {
        self.repository.find_one(id).await?;
        entry.set_id(id.to_string());
        entry.normalize();
        self.repository.upsert(id, &entry).await?;
        Ok(entry)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<T> {
        let removed = self.repository.delete(id).await?;
        tracing::info!("Deleted {} {}", T::KIND, id);
        Ok(removed)
    }
}
