use serde::{Deserialize, Serialize};

use crate::database::Document;

/// A user-owned card album. `card_ids` is an ordered sequence that may repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(rename = "type", default)]
    pub binder_type: String,
    pub owner_id: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub card_ids: Vec<String>,
}

/// Client-editable binder fields. Has no owner field; the owner always comes
/// from the authenticated principal.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BinderDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(rename = "type", default)]
    pub binder_type: String,
    #[serde(default)]
    pub is_favorite: bool,
    /// Only honoured on create.
    #[serde(default)]
    pub card_ids: Vec<String>,
}

impl Binder {
    pub fn new(id: String, owner_id: String, draft: BinderDraft) -> Self {
        Self {
            id,
            owner_id,
            name: draft.name,
            description: draft.description,
            image_url: draft.image_url,
            binder_type: draft.binder_type,
            is_favorite: draft.is_favorite,
            card_ids: draft.card_ids,
        }
    }

    /// Replaces every scalar field. `id`, `owner_id` and `card_ids` are untouched.
    pub fn apply(&mut self, draft: BinderDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.image_url = draft.image_url;
        self.binder_type = draft.binder_type;
        self.is_favorite = draft.is_favorite;
    }

    pub fn push_card(&mut self, card_id: impl Into<String>) {
        self.card_ids.push(card_id.into());
    }

    /// Removes the first occurrence of `card_id`, keeping the order of the rest.
    /// Returns false when the card was not in the binder.
    pub fn remove_card(&mut self, card_id: &str) -> bool {
        match self.card_ids.iter().position(|id| id == card_id) {
            Some(index) => {
                self.card_ids.remove(index);
                true
            }
            None => false,
        }
    }
}

impl Document for Binder {
    const COLLECTION: &'static str = "binders";

    fn id(&self) -> &str {
        &self.id
    }
}
