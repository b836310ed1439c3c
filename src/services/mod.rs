pub mod authz;
pub mod binder_service;
pub mod card_service;
pub mod catalog_service;
pub mod user_service;

use std::collections::HashMap;

use thiserror::Error;

use crate::auth::{PasswordError, TokenError};
use crate::database::{DatabaseError, Document};
use crate::filter::FilterError;

pub use binder_service::BinderService;
pub use card_service::CardService;
pub use catalog_service::{CatalogEntry, CatalogService};
pub use user_service::UserService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ServiceError::NotFound(msg),
            DatabaseError::Conflict(msg) => ServiceError::Conflict(msg),
            other => ServiceError::Database(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Rebuilds `ids` order from an unordered batch fetch. Repeated ids yield
/// repeated documents; ids with no document are skipped.
pub(crate) fn arrange_by_ids<T: Document>(ids: &[String], documents: Vec<T>) -> Vec<T> {
    let by_id: HashMap<String, T> = documents
        .into_iter()
        .map(|doc| (doc.id().to_string(), doc))
        .collect();

    ids.iter()
        .filter_map(|id| {
            let found = by_id.get(id).cloned();
            if found.is_none() {
                tracing::debug!("Dropping dangling {} reference {}", T::COLLECTION, id);
            }
            found
        })
        .collect()
}
