//! Clothing item repository

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use common::fault::StorageFault;

use crate::models::{ClothingItem, ItemFilter, NewClothingItem, ObjectId};

/// Clothing item repository
#[derive(Clone, Default)]
pub struct ItemRepository {
    items: Arc<RwLock<HashMap<ObjectId, ClothingItem>>>,
}

impl ItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an item owned by the given user.
    pub async fn create(
        &self,
        new_item: NewClothingItem,
        owner: ObjectId,
    ) -> Result<ClothingItem, StorageFault> {
        let violations = new_item.constraint_violations();
        if !violations.is_empty() {
            return Err(StorageFault::Constraint { violations });
        }

        let item = ClothingItem {
            id: ObjectId::new(),
            name: new_item.name,
            weather: new_item.weather,
            image_url: new_item.image_url,
            owner,
            likes: Vec::new(),
            created_at: Utc::now(),
        };

        self.items.write().await.insert(item.id, item.clone());
        info!("Created clothing item {}", item.id);
        Ok(item)
    }

    /// List items matching the filter, oldest first.
    pub async fn list(&self, filter: &ItemFilter) -> Vec<ClothingItem> {
        let items = self.items.read().await;
        let mut matched: Vec<ClothingItem> = items
            .values()
            .filter(|item| item.matches(filter))
            .cloned()
            .collect();
        matched.sort_by_key(|item| (item.created_at, item.id));
        matched
    }

    /// Find an item by id; a missing document is a `NotFound` fault.
    pub async fn find_by_id(&self, id: ObjectId) -> Result<ClothingItem, StorageFault> {
        self.items
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StorageFault::NotFound)
    }

    /// Delete an item by id.
    pub async fn delete(&self, id: ObjectId) -> Result<(), StorageFault> {
        self.items
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageFault::NotFound)
    }

    /// Add a user to the item's likes. Set semantics: liking twice leaves
    /// a single membership.
    pub async fn add_like(
        &self,
        id: ObjectId,
        user_id: ObjectId,
    ) -> Result<ClothingItem, StorageFault> {
        let mut items = self.items.write().await;
        let item = items.get_mut(&id).ok_or(StorageFault::NotFound)?;
        if !item.likes.contains(&user_id) {
            item.likes.push(user_id);
        }
        Ok(item.clone())
    }

    /// Remove a user from the item's likes. Removing an absent like is
    /// a no-op.
    pub async fn remove_like(
        &self,
        id: ObjectId,
        user_id: ObjectId,
    ) -> Result<ClothingItem, StorageFault> {
        let mut items = self.items.write().await;
        let item = items.get_mut(&id).ok_or(StorageFault::NotFound)?;
        item.likes.retain(|liker| *liker != user_id);
        Ok(item.clone())
    }
}
