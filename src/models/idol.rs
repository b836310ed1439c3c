use serde::{Deserialize, Serialize};

use crate::api::format::title_case;
use crate::database::Document;
use crate::services::catalog_service::CatalogEntry;

/// An idol. `group_id` is informational and is not cross-checked against groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idol {
    #[serde(default)]
    pub id: String,
    pub stage_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub group_id: String,
}

impl Document for Idol {
    const COLLECTION: &'static str = "idols";

    fn id(&self) -> &str {
        &self.id
    }
}

impl CatalogEntry for Idol {
    const KIND: &'static str = "idol";

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn normalize(&mut self) {
        self.name = title_case(&self.name);
        self.stage_name = title_case(&self.stage_name);
    }
}
