use serde::{Deserialize, Serialize};

use crate::api::format::title_case;
use crate::database::Document;
use crate::services::catalog_service::CatalogEntry;

/// A card release (album, season's greetings, fan-meeting set, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub group_id: String,
}

impl Document for Collection {
    const COLLECTION: &'static str = "collections";

    fn id(&self) -> &str {
        &self.id
    }
}

impl CatalogEntry for Collection {
    const KIND: &'static str = "collection";

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn normalize(&mut self) {
        self.name = title_case(&self.name);
    }
}
