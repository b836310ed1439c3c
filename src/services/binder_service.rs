use std::sync::Arc;

use uuid::Uuid;

use crate::auth::Principal;
use crate::database::Repository;
use crate::filter::{Filter, Page};
use crate::models::{Binder, BinderDraft, Card, EnrichedCard};
use crate::services::authz::ensure_owner;
use crate::services::{arrange_by_ids, CardService, ServiceResult};

const OWNER_ATTRIBUTE: &str = "owner_id";

/// Binder CRUD scoped to the calling user, plus card membership edits.
///
/// Every single-binder operation loads the record and checks ownership before
/// doing anything else. Writes are read-modify-write with last-writer-wins.
#[derive(Clone)]
pub struct BinderService {
    binders: Arc<dyn Repository<Binder>>,
    cards: Arc<dyn Repository<Card>>,
    card_service: CardService,
}

impl BinderService {
    pub fn new(binders: Arc<dyn Repository<Binder>>, cards: Arc<dyn Repository<Card>>, card_service: CardService) -> Self {
        Self {
            binders,
            cards,
            card_service,
        }
    }

    pub async fn create(&self, principal: &Principal, draft: BinderDraft) -> ServiceResult<Binder> {
        let binder = Binder::new(Uuid::new_v4().to_string(), principal.user_id.clone(), draft);
        self.binders.upsert(&binder.id, &binder).await?;
        tracing::info!("User {} created binder {}", principal.user_id, binder.id);
        Ok(binder)
    }

    pub async fn get(&self, principal: &Principal, id: &str) -> ServiceResult<Binder> {
        let binder = self.binders.find_one(id).await?;
        ensure_owner(principal, &binder.owner_id, &format!("binder {id}"))?;
        Ok(binder)
    }

    /// Any `owner_id` condition in `filter` is replaced with the caller's id.
    pub async fn list(&self, principal: &Principal, mut filter: Filter, page: Page) -> ServiceResult<Vec<Binder>> {
        filter.set(OWNER_ATTRIBUTE, principal.user_id.as_str())?;
        Ok(self.binders.search(&filter, page, None).await?)
    }

    pub async fn update(&self, principal: &Principal, id: &str, draft: BinderDraft) -> ServiceResult<Binder> {
        let mut binder = self.get(principal, id).await?;
        binder.apply(draft);
        self.binders.upsert(id, &binder).await?;
        Ok(binder)
    }

    pub async fn delete(&self, principal: &Principal, id: &str) -> ServiceResult<Binder> {
        self.get(principal, id).await?;
        let removed = self.binders.delete(id).await?;
        tracing::info!("User {} deleted binder {}", principal.user_id, id);
        Ok(removed)
    }

    /// Appends `card_id`. The card is not required to exist.
    pub async fn add_card(&self, principal: &Principal, id: &str, card_id: &str) -> ServiceResult<Binder> {
        let mut binder = self.get(principal, id).await?;
        binder.push_card(card_id);
        self.binders.upsert(id, &binder).await?;
        Ok(binder)
    }

    /// Removes the first occurrence of `card_id`. Absent ids leave the binder as is.
    pub async fn remove_card(&self, principal: &Principal, id: &str, card_id: &str) -> ServiceResult<Binder> {
        let mut binder = self.get(principal, id).await?;
        if !binder.remove_card(card_id) {
            tracing::debug!("Card {} not in binder {}", card_id, id);
        }
        self.binders.upsert(id, &binder).await?;
        Ok(binder)
    }

    /// Cards in `card_ids` order, repeats included. Unresolvable ids are dropped.
    pub async fn cards(&self, principal: &Principal, id: &str) -> ServiceResult<Vec<Card>> {
        let binder = self.get(principal, id).await?;
        let fetched = self.cards.find(&binder.card_ids).await?;
        Ok(arrange_by_ids(&binder.card_ids, fetched))
    }

    pub async fn enriched_cards(&self, principal: &Principal, id: &str) -> ServiceResult<Vec<EnrichedCard>> {
        let cards = self.cards(principal, id).await?;
        self.card_service.enrich_all(cards).await
    }
}
