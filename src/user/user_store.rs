use super::auth::PasswordCredentials;
use super::user_models::{
    CollectionId, CollectionItem, CollectionItemId, CollectionItemUpdate, NewCollectionItem, User,
};
use crate::catalog_store::ReleaseId;
use anyhow::Result;

pub trait UserStore: Send + Sync {
    /// Creates a new user and returns the user id.
    fn create_user(&self, user_handle: &str, email: &str) -> Result<usize>;

    /// Returns the user id for a handle.
    /// Returns Ok(None) if the user does not exist.
    fn get_user_id(&self, user_handle: &str) -> Result<Option<usize>>;

    fn get_user(&self, user_id: usize) -> Result<Option<User>>;

    /// Stores (or replaces) the user's password credentials.
    fn set_password_credentials(&self, credentials: &PasswordCredentials) -> Result<()>;

    /// Returns Ok(None) if the user has no password credentials.
    fn get_password_credentials(&self, user_id: usize) -> Result<Option<PasswordCredentials>>;
}

/// The per-user ledger of owned releases.
pub trait CollectionStore: Send + Sync {
    /// Returns Ok(None) if the user has no collection yet.
    fn get_collection_id(&self, user_id: usize) -> Result<Option<CollectionId>>;

    /// Creates the user's collection. Fails if one already exists.
    fn create_collection(&self, user_id: usize) -> Result<CollectionId>;

    /// Looks up an item by its (collection, release) pair.
    fn find_collection_item(
        &self,
        collection_id: CollectionId,
        release_id: ReleaseId,
    ) -> Result<Option<CollectionItem>>;

    /// Inserts an item. Fails if the release is already in the collection.
    fn create_collection_item(
        &self,
        collection_id: CollectionId,
        item: &NewCollectionItem,
    ) -> Result<CollectionItem>;

    /// Applies a partial update to an item of this collection.
    /// Returns Ok(None) if no such item belongs to the collection.
    fn update_collection_item(
        &self,
        collection_id: CollectionId,
        item_id: CollectionItemId,
        update: &CollectionItemUpdate,
    ) -> Result<Option<CollectionItem>>;

    /// Returns whether an item was removed.
    fn remove_collection_item(
        &self,
        collection_id: CollectionId,
        item_id: CollectionItemId,
    ) -> Result<bool>;

    /// All items, most recently added first. Items without a date come last.
    fn list_collection_items(&self, collection_id: CollectionId) -> Result<Vec<CollectionItem>>;

    fn count_collection_items(&self, collection_id: CollectionId) -> Result<usize>;
}

pub trait FullUserStore: UserStore + CollectionStore {
    fn as_collection_store(&self) -> &dyn CollectionStore;
}

impl<T: UserStore + CollectionStore> FullUserStore for T {
    fn as_collection_store(&self) -> &dyn CollectionStore {
        self
    }
}
