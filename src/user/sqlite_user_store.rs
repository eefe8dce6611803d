use crate::catalog_store::ReleaseId;
use crate::sqlite_column;
use crate::sqlite_persistence::{
    open_versioned_db, Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
    DEFAULT_TIMESTAMP,
};
use crate::user::*;
use anyhow::{anyhow, bail, Context, Result};
use rusqlite::{params, types::Type, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

pub const USER_DB_FILE_NAME: &str = "user.db";

/// V 0
const USER_TABLE_V_0: Table = Table {
    name: "user",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_unique = true
        ),
        sqlite_column!("handle", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!("email", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[],
    indices: &[("idx_user_handle", "handle")],
};
const USER_PASSWORD_CREDENTIALS_V_0: Table = Table {
    name: "user_password_credentials",
    columns: &[
        sqlite_column!(
            "user_id",
            &SqlType::Integer,
            non_null = true,
            is_unique = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "user",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("hash", &SqlType::Text, non_null = true),
        sqlite_column!("hasher", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[],
    indices: &[],
};

/// V 1
const COLLECTION_TABLE_V_1: Table = Table {
    name: "collection",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_unique = true
        ),
        sqlite_column!(
            "user_id",
            &SqlType::Integer,
            non_null = true,
            is_unique = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "user",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[],
    indices: &[],
};
const COLLECTION_ITEM_TABLE_V_1: Table = Table {
    name: "collection_item",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_unique = true
        ),
        sqlite_column!(
            "collection_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "collection",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        // Catalog rowid, lives in another database file
        sqlite_column!("release_id", &SqlType::Integer, non_null = true),
        sqlite_column!("condition", &SqlType::Text, non_null = true),
        sqlite_column!("rating", &SqlType::Integer),
        sqlite_column!("notes", &SqlType::Text),
        sqlite_column!("added_at", &SqlType::Integer),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[&["collection_id", "release_id"]],
    indices: &[("idx_collection_item_collection", "collection_id")],
};

pub const VERSIONED_SCHEMAS: &[VersionedSchema] = &[
    VersionedSchema {
        version: 0,
        tables: &[USER_TABLE_V_0, USER_PASSWORD_CREDENTIALS_V_0],
        migration: None,
    },
    VersionedSchema {
        version: 1,
        tables: &[
            USER_TABLE_V_0,
            USER_PASSWORD_CREDENTIALS_V_0,
            COLLECTION_TABLE_V_1,
            COLLECTION_ITEM_TABLE_V_1,
        ],
        migration: Some(|conn: &Connection| {
            COLLECTION_TABLE_V_1.create(conn)?;
            COLLECTION_ITEM_TABLE_V_1.create(conn)?;
            Ok(())
        }),
    },
];

const COLLECTION_ITEM_COLUMNS: &str =
    "id, collection_id, release_id, condition, rating, notes, added_at";

#[derive(Clone)]
pub struct SqliteUserStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteUserStore {
    pub fn new<T: AsRef<Path>>(db_path: T) -> Result<Self> {
        let conn = open_versioned_db(db_path, VERSIONED_SCHEMAS, "user")?;
        Ok(SqliteUserStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("User store connection mutex poisoned"))
    }

    fn parse_collection_item_row(row: &rusqlite::Row) -> rusqlite::Result<CollectionItem> {
        let condition: String = row.get(3)?;
        let condition = ItemCondition::from_db_str(&condition).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                Type::Text,
                format!("Unknown item condition {}", condition).into(),
            )
        })?;
        Ok(CollectionItem {
            id: row.get(0)?,
            collection_id: row.get(1)?,
            release_id: row.get(2)?,
            condition,
            rating: row.get(4)?,
            notes: row.get(5)?,
            added_at: row.get(6)?,
        })
    }

    fn get_collection_item(
        conn: &Connection,
        collection_id: CollectionId,
        item_id: CollectionItemId,
    ) -> Result<Option<CollectionItem>> {
        let item = conn
            .query_row(
                &format!(
                    "SELECT {} FROM {} WHERE id = ?1 AND collection_id = ?2",
                    COLLECTION_ITEM_COLUMNS, COLLECTION_ITEM_TABLE_V_1.name
                ),
                params![item_id, collection_id],
                Self::parse_collection_item_row,
            )
            .optional()?;
        Ok(item)
    }
}

fn check_rating(rating: Option<u8>) -> Result<()> {
    if let Some(rating) = rating {
        if !is_valid_rating(rating as i64) {
            bail!(
                "Rating {} is outside {}..={}",
                rating,
                MIN_RATING,
                MAX_RATING
            );
        }
    }
    Ok(())
}

impl UserStore for SqliteUserStore {
    fn create_user(&self, user_handle: &str, email: &str) -> Result<usize> {
        let conn = self.conn()?;
        conn.execute(
            &format!(
                "INSERT INTO {} (handle, email) VALUES (?1, ?2)",
                USER_TABLE_V_0.name
            ),
            params![user_handle, email],
        )
        .with_context(|| format!("Failed to create user {}", user_handle))?;
        Ok(conn.last_insert_rowid() as usize)
    }

    fn get_user_id(&self, user_handle: &str) -> Result<Option<usize>> {
        let conn = self.conn()?;
        let id: Option<i64> = conn
            .query_row(
                &format!("SELECT id FROM {} WHERE handle = ?1", USER_TABLE_V_0.name),
                params![user_handle],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id.map(|id| id as usize))
    }

    fn get_user(&self, user_id: usize) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                &format!(
                    "SELECT id, handle, email FROM {} WHERE id = ?1",
                    USER_TABLE_V_0.name
                ),
                params![user_id],
                |row| {
                    Ok(User {
                        id: row.get::<usize, i64>(0)? as usize,
                        handle: row.get(1)?,
                        email: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    fn set_password_credentials(&self, credentials: &PasswordCredentials) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            &format!(
                "INSERT INTO {} (user_id, hash, hasher) VALUES (?1, ?2, ?3)
                 ON CONFLICT(user_id) DO UPDATE SET hash = excluded.hash, hasher = excluded.hasher",
                USER_PASSWORD_CREDENTIALS_V_0.name
            ),
            params![
                credentials.user_id,
                &credentials.hash,
                credentials.hasher.to_string()
            ],
        )
        .with_context(|| {
            format!(
                "Failed to store credentials of user {}",
                credentials.user_id
            )
        })?;
        Ok(())
    }

    fn get_password_credentials(&self, user_id: usize) -> Result<Option<PasswordCredentials>> {
        let conn = self.conn()?;
        let row: Option<(String, String)> = conn
            .query_row(
                &format!(
                    "SELECT hash, hasher FROM {} WHERE user_id = ?1",
                    USER_PASSWORD_CREDENTIALS_V_0.name
                ),
                params![user_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        match row {
            Some((hash, hasher)) => Ok(Some(PasswordCredentials {
                user_id,
                hash,
                hasher: hasher.parse()?,
            })),
            None => Ok(None),
        }
    }
}

impl CollectionStore for SqliteUserStore {
    fn get_collection_id(&self, user_id: usize) -> Result<Option<CollectionId>> {
        let conn = self.conn()?;
        let id = conn
            .query_row(
                &format!(
                    "SELECT id FROM {} WHERE user_id = ?1",
                    COLLECTION_TABLE_V_1.name
                ),
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    fn create_collection(&self, user_id: usize) -> Result<CollectionId> {
        let conn = self.conn()?;
        conn.execute(
            &format!(
                "INSERT INTO {} (user_id) VALUES (?1)",
                COLLECTION_TABLE_V_1.name
            ),
            params![user_id],
        )
        .with_context(|| format!("Failed to create collection for user {}", user_id))?;
        Ok(conn.last_insert_rowid())
    }

    fn find_collection_item(
        &self,
        collection_id: CollectionId,
        release_id: ReleaseId,
    ) -> Result<Option<CollectionItem>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {} FROM {} WHERE collection_id = ?1 AND release_id = ?2",
            COLLECTION_ITEM_COLUMNS, COLLECTION_ITEM_TABLE_V_1.name
        ))?;
        let item = stmt
            .query_row(
                params![collection_id, release_id],
                Self::parse_collection_item_row,
            )
            .optional()?;
        Ok(item)
    }

    fn create_collection_item(
        &self,
        collection_id: CollectionId,
        item: &NewCollectionItem,
    ) -> Result<CollectionItem> {
        check_rating(item.rating)?;
        let conn = self.conn()?;
        conn.execute(
            &format!(
                "INSERT INTO {} (collection_id, release_id, condition, rating, notes, added_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                COLLECTION_ITEM_TABLE_V_1.name
            ),
            params![
                collection_id,
                item.release_id,
                item.condition.as_db_str(),
                item.rating,
                &item.notes,
                item.added_at,
            ],
        )
        .with_context(|| {
            format!(
                "Failed to add release {} to collection {}",
                item.release_id, collection_id
            )
        })?;
        let id = conn.last_insert_rowid();
        debug!(
            "Added release {} to collection {} as item {}",
            item.release_id, collection_id, id
        );
        Ok(CollectionItem {
            id,
            collection_id,
            release_id: item.release_id,
            condition: item.condition,
            rating: item.rating,
            notes: item.notes.clone(),
            added_at: item.added_at,
        })
    }

    fn update_collection_item(
        &self,
        collection_id: CollectionId,
        item_id: CollectionItemId,
        update: &CollectionItemUpdate,
    ) -> Result<Option<CollectionItem>> {
        check_rating(update.rating)?;
        let conn = self.conn()?;
        let changed = conn.execute(
            &format!(
                "UPDATE {} SET
                    condition = COALESCE(?3, condition),
                    rating = COALESCE(?4, rating),
                    notes = COALESCE(?5, notes)
                 WHERE id = ?1 AND collection_id = ?2",
                COLLECTION_ITEM_TABLE_V_1.name
            ),
            params![
                item_id,
                collection_id,
                update.condition.map(|c| c.as_db_str()),
                update.rating,
                &update.notes,
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        Self::get_collection_item(&conn, collection_id, item_id)
    }

    fn remove_collection_item(
        &self,
        collection_id: CollectionId,
        item_id: CollectionItemId,
    ) -> Result<bool> {
        let conn = self.conn()?;
        let removed = conn.execute(
            &format!(
                "DELETE FROM {} WHERE id = ?1 AND collection_id = ?2",
                COLLECTION_ITEM_TABLE_V_1.name
            ),
            params![item_id, collection_id],
        )?;
        Ok(removed > 0)
    }

    fn list_collection_items(&self, collection_id: CollectionId) -> Result<Vec<CollectionItem>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM {} WHERE collection_id = ?1
             ORDER BY added_at IS NULL, added_at DESC, id DESC",
            COLLECTION_ITEM_COLUMNS, COLLECTION_ITEM_TABLE_V_1.name
        ))?;
        let items = stmt
            .query_map(params![collection_id], Self::parse_collection_item_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    fn count_collection_items(&self, collection_id: CollectionId) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            &format!(
                "SELECT COUNT(*) FROM {} WHERE collection_id = ?1",
                COLLECTION_ITEM_TABLE_V_1.name
            ),
            params![collection_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
