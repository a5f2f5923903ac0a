//! Item repository
//!
//! Items are always addressed through their owning list: a matching item
//! id under a different list is treated as absent.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use todo_core::{new_id, ItemFields, TodoItem};

use crate::db::error::DbError;
use crate::db::retry::with_retry;

/// Item record from database
#[derive(Debug, Clone, FromRow)]
#[sqlx(rename_all = "camelCase")]
struct ItemRow {
    id: String,
    list_id: String,
    name: String,
    description: Option<String>,
    state: String,
    due_date: Option<DateTime<Utc>>,
    completed_date: Option<DateTime<Utc>>,
    created_date: DateTime<Utc>,
    updated_date: DateTime<Utc>,
}

impl TryFrom<ItemRow> for TodoItem {
    type Error = DbError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let state = row.state.parse().map_err(|e| DbError::Corrupt {
            resource: "item",
            id: row.id.clone(),
            reason: format!("{}", e),
        })?;

        Ok(TodoItem {
            id: row.id,
            list_id: row.list_id,
            name: row.name,
            description: row.description,
            state,
            due_date: row.due_date,
            completed_date: row.completed_date,
            created_date: row.created_date,
            updated_date: row.updated_date,
        })
    }
}

/// Item repository
pub struct ItemRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ItemRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All items of a list. Unknown lists simply have no items.
    pub async fn list_for(&self, list_id: &str) -> Result<Vec<TodoItem>, DbError> {
        let rows: Vec<ItemRow> = with_retry("list_items", || async {
            sqlx::query_as(
                r#"
                SELECT id, listId, name, description, state, dueDate, completedDate, createdDate, updatedDate
                FROM Items
                WHERE listId = ?
                "#,
            )
            .bind(list_id)
            .fetch_all(self.pool)
            .await
        })
        .await?;

        rows.into_iter().map(TodoItem::try_from).collect()
    }

    /// Get a single item of a list.
    pub async fn get(&self, list_id: &str, item_id: &str) -> Result<TodoItem, DbError> {
        let row: Option<ItemRow> = with_retry("get_item", || async {
            sqlx::query_as(
                r#"
                SELECT id, listId, name, description, state, dueDate, completedDate, createdDate, updatedDate
                FROM Items
                WHERE id = ? AND listId = ?
                "#,
            )
            .bind(item_id)
            .bind(list_id)
            .fetch_optional(self.pool)
            .await
        })
        .await?;

        row.ok_or_else(|| DbError::not_found("item", item_id))?
            .try_into()
    }

    /// Create an item under a list.
    ///
    /// The list's existence is enforced by the foreign key; a violation is
    /// reported as the list not being found.
    pub async fn create(&self, list_id: &str, fields: ItemFields) -> Result<TodoItem, DbError> {
        let now = Utc::now();
        let item = TodoItem {
            id: new_id(),
            list_id: list_id.to_owned(),
            name: fields.name.into_string(),
            description: fields.description,
            state: fields.state,
            due_date: fields.due_date,
            completed_date: fields.completed_date,
            created_date: now,
            updated_date: now,
        };

        let result = with_retry("create_item", || async {
            sqlx::query(
                r#"
                INSERT INTO Items (id, listId, name, description, state, dueDate, completedDate, createdDate, updatedDate)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item.id)
            .bind(&item.list_id)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.state.as_str())
            .bind(item.due_date)
            .bind(item.completed_date)
            .bind(item.created_date)
            .bind(item.updated_date)
            .execute(self.pool)
            .await
        })
        .await;

        match result {
            Ok(_) => {
                tracing::debug!(list_id, item_id = %item.id, "created item");
                Ok(item)
            }
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Err(DbError::not_found("list", list_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the mutable fields of an item and refresh `updatedDate`.
    pub async fn update(
        &self,
        list_id: &str,
        item_id: &str,
        fields: ItemFields,
    ) -> Result<TodoItem, DbError> {
        let now = Utc::now();
        let row: Option<ItemRow> = with_retry("update_item", || async {
            sqlx::query_as(
                r#"
                UPDATE Items
                SET name = ?, description = ?, state = ?, dueDate = ?, completedDate = ?, updatedDate = ?
                WHERE id = ? AND listId = ?
                RETURNING id, listId, name, description, state, dueDate, completedDate, createdDate, updatedDate
                "#,
            )
            .bind(fields.name.as_str())
            .bind(&fields.description)
            .bind(fields.state.as_str())
            .bind(fields.due_date)
            .bind(fields.completed_date)
            .bind(now)
            .bind(item_id)
            .bind(list_id)
            .fetch_optional(self.pool)
            .await
        })
        .await?;

        tracing::debug!(list_id, item_id, found = row.is_some(), "updated item");
        row.ok_or_else(|| DbError::not_found("item", item_id))?
            .try_into()
    }

    /// Delete an item. Returns whether a row was removed; absence is not an error.
    pub async fn delete(&self, list_id: &str, item_id: &str) -> Result<bool, DbError> {
        let result = with_retry("delete_item", || async {
            sqlx::query("DELETE FROM Items WHERE id = ? AND listId = ?")
                .bind(item_id)
                .bind(list_id)
                .execute(self.pool)
                .await
        })
        .await?;

        let deleted = result.rows_affected() > 0;
        tracing::debug!(list_id, item_id, deleted, "deleted item");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, ensure_schema, ListRepo};
    use chrono::TimeZone;
    use todo_core::{ItemPayload, ListFields, ListPayload, TodoItemState};

    async fn setup() -> (SqlitePool, String) {
        let pool = create_memory_pool().await.unwrap();
        ensure_schema(&pool).await.unwrap();
        let fields = ListFields::try_from(ListPayload::new("Groceries", None)).unwrap();
        let list = ListRepo::new(&pool).create(fields).await.unwrap();
        (pool, list.id)
    }

    fn fields(payload: ItemPayload) -> ItemFields {
        ItemFields::from_payload(payload, Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let (pool, list_id) = setup().await;
        let repo = ItemRepo::new(&pool);

        let item = repo.create(&list_id, fields(ItemPayload::named("Milk"))).await.unwrap();
        assert!(!item.id.is_empty());
        assert_eq!(item.list_id, list_id);
        assert_eq!(item.state, TodoItemState::Todo);
        assert_eq!(item.created_date, item.updated_date);

        let fetched = repo.get(&list_id, &item.id).await.unwrap();
        assert_eq!(fetched, item);
    }

    #[tokio::test]
    async fn create_under_unknown_list_is_not_found() {
        let (pool, _) = setup().await;
        let err = ItemRepo::new(&pool)
            .create("missing", fields(ItemPayload::named("Milk")))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { resource: "list", .. }));
    }

    #[tokio::test]
    async fn update_round_trips_completion() {
        let (pool, list_id) = setup().await;
        let repo = ItemRepo::new(&pool);
        let item = repo.create(&list_id, fields(ItemPayload::named("Milk"))).await.unwrap();

        let completed = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let payload = ItemPayload {
            state: Some("done".into()),
            completed_date: Some(completed),
            ..ItemPayload::named("Milk")
        };
        let updated = repo.update(&list_id, &item.id, fields(payload)).await.unwrap();
        assert_eq!(updated.state, TodoItemState::Done);
        assert_eq!(updated.completed_date, Some(completed));
        assert_eq!(updated.created_date, item.created_date);
        assert!(updated.updated_date >= item.updated_date);

        let fetched = repo.get(&list_id, &item.id).await.unwrap();
        assert_eq!(fetched.completed_date, Some(completed));
    }

    #[tokio::test]
    async fn item_is_scoped_to_its_list() {
        let (pool, list_id) = setup().await;
        let other = ListRepo::new(&pool)
            .create(ListFields::try_from(ListPayload::new("Work", None)).unwrap())
            .await
            .unwrap();
        let repo = ItemRepo::new(&pool);
        let item = repo.create(&list_id, fields(ItemPayload::named("Milk"))).await.unwrap();

        assert!(matches!(
            repo.get(&other.id, &item.id).await.unwrap_err(),
            DbError::NotFound { resource: "item", .. }
        ));
        assert!(matches!(
            repo.update(&other.id, &item.id, fields(ItemPayload::named("x"))).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
        assert!(!repo.delete(&other.id, &item.id).await.unwrap());
        assert!(repo.get(&list_id, &item.id).await.is_ok());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (pool, list_id) = setup().await;
        let repo = ItemRepo::new(&pool);
        let item = repo.create(&list_id, fields(ItemPayload::named("Milk"))).await.unwrap();

        assert!(repo.delete(&list_id, &item.id).await.unwrap());
        assert!(!repo.delete(&list_id, &item.id).await.unwrap());
        assert!(repo.list_for(&list_id).await.unwrap().is_empty());
    }
}
