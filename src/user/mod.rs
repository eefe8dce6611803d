pub mod auth;
mod sqlite_user_store;
mod user_manager;
pub mod user_models;
mod user_store;

pub use auth::{CredentialHasher, PasswordCredentials};
pub use sqlite_user_store::{SqliteUserStore, USER_DB_FILE_NAME};
pub use user_manager::{ImportOwner, UserManager};
pub use user_models::{
    is_valid_rating, CollectionEntry, CollectionId, CollectionItem, CollectionItemId,
    CollectionItemUpdate, CollectionSummary, ItemCondition, NewCollectionItem, User, MAX_RATING,
    MIN_RATING,
};
pub use user_store::{CollectionStore, FullUserStore, UserStore};
