use serde::{Deserialize, Serialize};

use crate::api::format::title_case;
use crate::database::Document;
use crate::services::catalog_service::CatalogEntry;

use super::{Collection, Group, Idol};

/// Card release type. Values outside the known set are kept verbatim so
/// catalog data written by older clients still round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CardType {
    #[default]
    Regular,
    PreOrderBonus,
    Event,
    Special,
    Trading,
    Limited,
    Merch,
    LuckyDraw,
    Other(String),
}

impl CardType {
    pub fn as_str(&self) -> &str {
        match self {
            CardType::Regular => "regular",
            CardType::PreOrderBonus => "pob",
            CardType::Event => "event",
            CardType::Special => "special",
            CardType::Trading => "trading",
            CardType::Limited => "limited",
            CardType::Merch => "merch",
            CardType::LuckyDraw => "lucky_draw",
            CardType::Other(raw) => raw,
        }
    }

    /// Short code shown on card thumbnails. Unknown types display as regular.
    pub fn display_code(&self) -> &'static str {
        match self {
            CardType::Regular => "R",
            CardType::PreOrderBonus => "POB",
            CardType::Event => "Event",
            CardType::Special => "S",
            CardType::Trading => "TC",
            CardType::Limited => "Lim",
            CardType::Merch => "Merch",
            CardType::LuckyDraw => "LD",
            CardType::Other(_) => "R",
        }
    }
}

impl From<String> for CardType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "regular" => CardType::Regular,
            "pob" => CardType::PreOrderBonus,
            "event" => CardType::Event,
            "special" => CardType::Special,
            "trading" => CardType::Trading,
            "limited" => CardType::Limited,
            "merch" => CardType::Merch,
            "lucky_draw" => CardType::LuckyDraw,
            _ => CardType::Other(value),
        }
    }
}

impl From<CardType> for String {
    fn from(value: CardType) -> Self {
        match value {
            CardType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(rename = "type", default)]
    pub card_type: CardType,
    #[serde(default)]
    pub image_url: String,
    pub group_id: String,
    pub collection_id: String,
    #[serde(default)]
    pub idol_ids: Vec<String>,
}

impl Document for Card {
    const COLLECTION: &'static str = "cards";

    fn id(&self) -> &str {
        &self.id
    }
}

impl CatalogEntry for Card {
    const KIND: &'static str = "card";

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn normalize(&mut self) {
        self.name = title_case(&self.name);
    }
}

/// Read-time projection of a card joined with its group, idols and collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCard {
    pub id: String,
    pub name: String,
    pub short_name: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub display_type: String,
    pub image_url: String,
    pub group: Group,
    pub collection: Collection,
    pub idols: Vec<Idol>,
}

impl EnrichedCard {
    pub fn assemble(card: Card, group: Group, collection: Collection, idols: Vec<Idol>) -> Self {
        Self {
            display_type: card.card_type.display_code().to_string(),
            id: card.id,
            name: card.name,
            short_name: card.short_name,
            card_type: card.card_type,
            image_url: card.image_url,
            group,
            collection,
            idols,
        }
    }
}
