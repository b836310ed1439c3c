use std::sync::Arc;

use futures::future::try_join_all;

use crate::database::Repository;
use crate::models::{Card, Collection, EnrichedCard, Group, Idol};
use crate::services::{arrange_by_ids, ServiceResult};

/// Joins cards with their group, idols and collection.
#[derive(Clone)]
pub struct CardService {
    cards: Arc<dyn Repository<Card>>,
    groups: Arc<dyn Repository<Group>>,
    idols: Arc<dyn Repository<Idol>>,
    collections: Arc<dyn Repository<Collection>>,
}

impl CardService {
    pub fn new(
        cards: Arc<dyn Repository<Card>>,
        groups: Arc<dyn Repository<Group>>,
        idols: Arc<dyn Repository<Idol>>,
        collections: Arc<dyn Repository<Collection>>,
    ) -> Self {
        Self {
            cards,
            groups,
            idols,
            collections,
        }
    }

    pub async fn get_enriched(&self, card_id: &str) -> ServiceResult<EnrichedCard> {
        let card = self.cards.find_one(card_id).await?;
        self.enrich(card).await
    }

    /// The three lookups run concurrently. A dangling group or collection
    /// fails the whole enrichment; idols missing from the batch are skipped.
    pub async fn enrich(&self, card: Card) -> ServiceResult<EnrichedCard> {
        let (group, collection, idols) = tokio::try_join!(
            self.groups.find_one(&card.group_id),
            self.collections.find_one(&card.collection_id),
            self.idols.find(&card.idol_ids),
        )?;

        let idols = arrange_by_ids(&card.idol_ids, idols);
        Ok(EnrichedCard::assemble(card, group, collection, idols))
    }

    /// Enriches every card, keeping input order. Any failure fails the batch.
    pub async fn enrich_all(&self, cards: Vec<Card>) -> ServiceResult<Vec<EnrichedCard>> {
        try_join_all(cards.into_iter().map(|card| self.enrich(card))).await
    }
}
