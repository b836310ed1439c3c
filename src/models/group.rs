use serde::{Deserialize, Serialize};

use crate::api::format::title_case;
use crate::database::Document;
use crate::services::catalog_service::CatalogEntry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
}

impl Document for Group {
    const COLLECTION: &'static str = "groups";

    fn id(&self) -> &str {
        &self.id
    }
}

impl CatalogEntry for Group {
    const KIND: &'static str = "group";

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn normalize(&mut self) {
        self.name = title_case(&self.name);
    }
}
