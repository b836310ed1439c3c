use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::repository::{not_found, Document, Repository};
use crate::filter::filter_order::FilterOrder;
use crate::filter::{Filter, Page, Sort};

/// Insertion-ordered in-process store with the same filter semantics as
/// [`PgRepository`](crate::database::PgRepository).
pub struct MemoryRepository<T> {
    documents: RwLock<Vec<T>>,
}

impl<T: Document> MemoryRepository<T> {
    pub fn new() -> Self {
        Self::with_documents(Vec::new())
    }

    pub fn with_documents(documents: Vec<T>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }
}

impl<T: Document> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Document> Repository<T> for MemoryRepository<T> {
    async fn find_one(&self, id: &str) -> Result<T, DatabaseError> {
        let documents = self.documents.read().await;
        documents
            .iter()
            .find(|doc| doc.id() == id)
            .cloned()
            .ok_or_else(|| not_found::<T>(id))
    }

    async fn find(&self, ids: &[String]) -> Result<Vec<T>, DatabaseError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|doc| ids.iter().any(|id| id == doc.id()))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<T>, DatabaseError> {
        Ok(self.documents.read().await.clone())
    }

    async fn search(&self, filter: &Filter, page: Page, sort: Option<&Sort>) -> Result<Vec<T>, DatabaseError> {
        let documents = self.documents.read().await;

        let mut matched: Vec<(Value, &T)> = Vec::new();
        for doc in documents.iter() {
            let value = serde_json::to_value(doc)?;
            if filter.matches(&value) {
                matched.push((value, doc));
            }
        }
        if let Some(sort) = sort {
            matched.sort_by(|(a, _), (b, _)| FilterOrder::compare(sort, a, b));
        }

        Ok(page.slice(matched.into_iter().map(|(_, doc)| doc.clone())))
    }

    async fn upsert(&self, id: &str, value: &T) -> Result<(), DatabaseError> {
        let mut documents = self.documents.write().await;
        if !T::UNIQUE.is_empty() {
            let incoming = serde_json::to_value(value)?;
            for doc in documents.iter().filter(|doc| doc.id() != id) {
                let stored = serde_json::to_value(doc)?;
                if let Some(attribute) = T::UNIQUE
                    .iter()
                    .find(|attribute| incoming.get(**attribute).is_some() && incoming.get(**attribute) == stored.get(**attribute))
                {
                    return Err(DatabaseError::Conflict(format!("{}_{}_key", T::COLLECTION, attribute)));
                }
            }
        }
        match documents.iter_mut().find(|doc| doc.id() == id) {
            Some(existing) => *existing = value.clone(),
            None => documents.push(value.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<T, DatabaseError> {
        let mut documents = self.documents.write().await;
        let index = documents
            .iter()
            .position(|doc| doc.id() == id)
            .ok_or_else(|| not_found::<T>(id))?;
        Ok(documents.remove(index))
    }
}
