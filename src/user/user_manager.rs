use super::{
    CollectionEntry, CollectionId, CollectionItem, CollectionItemId, CollectionItemUpdate,
    CollectionSummary, FullUserStore, PasswordCredentials,
};
use crate::catalog_store::CatalogStore;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// The user and collection an import writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportOwner {
    pub user_id: usize,
    pub collection_id: CollectionId,
}

pub struct UserManager {
    user_store: Arc<dyn FullUserStore>,
    placeholder_email_domain: String,
}

impl UserManager {
    pub fn new(user_store: Arc<dyn FullUserStore>, placeholder_email_domain: String) -> Self {
        Self {
            user_store,
            placeholder_email_domain,
        }
    }

    pub fn store(&self) -> &dyn FullUserStore {
        self.user_store.as_ref()
    }

    fn placeholder_email(&self, user_handle: &str) -> String {
        format!(
            "{}@{}",
            user_handle.to_lowercase(),
            self.placeholder_email_domain
        )
    }

    /// Finds the user, creating it with a locked credential if needed, and
    /// makes sure it owns a collection.
    pub fn ensure_user_with_collection(&self, user_handle: &str) -> Result<ImportOwner> {
        if user_handle.trim().is_empty() {
            bail!("The user handle cannot be empty.");
        }

        let user_id = match self.user_store.get_user_id(user_handle)? {
            Some(user_id) => user_id,
            None => {
                info!("Creating user: {}", user_handle);
                let user_id = self
                    .user_store
                    .create_user(user_handle, &self.placeholder_email(user_handle))?;
                self.user_store
                    .set_password_credentials(&PasswordCredentials::locked_placeholder(user_id))?;
                user_id
            }
        };

        let collection_id = match self.user_store.get_collection_id(user_id)? {
            Some(collection_id) => collection_id,
            None => {
                info!("Creating collection for user {}", user_handle);
                self.user_store
                    .create_collection(user_id)
                    .context("Failed to create collection for user")?
            }
        };

        Ok(ImportOwner {
            user_id,
            collection_id,
        })
    }

    /// Like [`Self::ensure_user_with_collection`] but never writes.
    pub fn find_owner(&self, user_handle: &str) -> Result<Option<ImportOwner>> {
        let Some(user_id) = self.user_store.get_user_id(user_handle)? else {
            return Ok(None);
        };
        Ok(self
            .user_store
            .get_collection_id(user_id)?
            .map(|collection_id| ImportOwner {
                user_id,
                collection_id,
            }))
    }

    /// Items newest first, joined with their catalog release.
    pub fn collection_entries(
        &self,
        collection_id: CollectionId,
        catalog: &dyn CatalogStore,
    ) -> Result<Vec<CollectionEntry>> {
        let items = self.user_store.list_collection_items(collection_id)?;
        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            let release = catalog.get_release(item.release_id)?.with_context(|| {
                format!(
                    "Collection item {} references missing release {}",
                    item.id, item.release_id
                )
            })?;
            let artists = catalog
                .get_release_artists(release.id)?
                .into_iter()
                .map(|credit| credit.artist.name)
                .collect();
            let label = catalog.get_label(release.label_id)?.map(|l| l.name);
            let format = catalog.get_format(release.format_id)?.map(|f| f.name);
            entries.push(CollectionEntry {
                item,
                title: release.title,
                catalog_number: release.catalog_number,
                artists,
                label,
                format,
            });
        }
        Ok(entries)
    }

    pub fn collection_summary(&self, collection_id: CollectionId) -> Result<CollectionSummary> {
        let items = self.user_store.list_collection_items(collection_id)?;
        Ok(CollectionSummary::from_items(&items))
    }

    pub fn update_collection_item(
        &self,
        collection_id: CollectionId,
        item_id: CollectionItemId,
        update: &CollectionItemUpdate,
    ) -> Result<CollectionItem> {
        self.user_store
            .update_collection_item(collection_id, item_id, update)?
            .with_context(|| format!("Item {} not found in collection", item_id))
    }

    pub fn remove_collection_item(
        &self,
        collection_id: CollectionId,
        item_id: CollectionItemId,
    ) -> Result<()> {
        if !self
            .user_store
            .remove_collection_item(collection_id, item_id)?
        {
            bail!("Item {} not found in collection", item_id);
        }
        Ok(())
    }
}
