//! List repository
//!
//! Handles list CRUD:
//! - get: list row plus its items
//! - delete: cascades to items through the foreign key

use sqlx::{FromRow, SqlitePool};
use todo_core::{new_id, ListFields, TodoList};

use crate::db::error::DbError;
use crate::db::repos::ItemRepo;
use crate::db::retry::with_retry;

/// List record from database
#[derive(Debug, Clone, FromRow)]
struct ListRow {
    id: String,
    name: String,
    description: Option<String>,
}

impl From<ListRow> for TodoList {
    fn from(row: ListRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            items: None,
        }
    }
}

/// List repository
pub struct ListRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ListRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All lists, without their items, oldest first.
    pub async fn list(&self) -> Result<Vec<TodoList>, DbError> {
        let rows: Vec<ListRow> = with_retry("list_lists", || async {
            sqlx::query_as("SELECT id, name, description FROM Lists ORDER BY rowid")
                .fetch_all(self.pool)
                .await
        })
        .await?;

        Ok(rows.into_iter().map(TodoList::from).collect())
    }

    /// Get a single list with its items.
    pub async fn get(&self, id: &str) -> Result<TodoList, DbError> {
        let row: Option<ListRow> = with_retry("get_list", || async {
            sqlx::query_as("SELECT id, name, description FROM Lists WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool)
                .await
        })
        .await?;

        let mut list = TodoList::from(row.ok_or_else(|| DbError::not_found("list", id))?);
        list.items = Some(ItemRepo::new(self.pool).list_for(id).await?);
        Ok(list)
    }

    /// Create a list with a generated id.
    pub async fn create(&self, fields: ListFields) -> Result<TodoList, DbError> {
        let list = TodoList {
            id: new_id(),
            name: fields.name.into_string(),
            description: fields.description,
            items: None,
        };

        with_retry("create_list", || async {
            sqlx::query("INSERT INTO Lists (id, name, description) VALUES (?, ?, ?)")
                .bind(&list.id)
                .bind(&list.name)
                .bind(&list.description)
                .execute(self.pool)
                .await
        })
        .await?;

        tracing::debug!(list_id = %list.id, "created list");
        Ok(list)
    }

    /// Replace name and description of a list.
    pub async fn update(&self, id: &str, fields: ListFields) -> Result<TodoList, DbError> {
        let row: Option<ListRow> = with_retry("update_list", || async {
            sqlx::query_as(
                r#"
                UPDATE Lists
                SET name = ?, description = ?
                WHERE id = ?
                RETURNING id, name, description
                "#,
            )
            .bind(fields.name.as_str())
            .bind(&fields.description)
            .bind(id)
            .fetch_optional(self.pool)
            .await
        })
        .await?;

        tracing::debug!(list_id = id, found = row.is_some(), "updated list");
        row.map(TodoList::from)
            .ok_or_else(|| DbError::not_found("list", id))
    }

    /// Delete a list and, by cascade, its items. Returns whether a row was
    /// removed; absence is not an error.
    pub async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let result = with_retry("delete_list", || async {
            sqlx::query("DELETE FROM Lists WHERE id = ?")
                .bind(id)
                .execute(self.pool)
                .await
        })
        .await?;

        let deleted = result.rows_affected() > 0;
        tracing::debug!(list_id = id, deleted, "deleted list");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, ensure_schema};
    use chrono::Utc;
    use todo_core::{ItemFields, ItemPayload, ListPayload};

    async fn pool() -> SqlitePool {
        let pool = create_memory_pool().await.unwrap();
        ensure_schema(&pool).await.unwrap();
        pool
    }

    fn fields(name: &str, description: Option<&str>) -> ListFields {
        ListFields::try_from(ListPayload::new(name, description.map(str::to_owned))).unwrap()
    }

    #[tokio::test]
    async fn create_then_get() {
        let pool = pool().await;
        let repo = ListRepo::new(&pool);

        let created = repo.create(fields("Groceries", Some("weekly"))).await.unwrap();
        assert!(!created.id.is_empty());

        let fetched = repo.get(&created.id).await.unwrap();
        assert_eq!(fetched.name, "Groceries");
        assert_eq!(fetched.description.as_deref(), Some("weekly"));
        assert_eq!(fetched.items, Some(vec![]));
    }

    #[tokio::test]
    async fn list_omits_items() {
        let pool = pool().await;
        let repo = ListRepo::new(&pool);
        repo.create(fields("a", None)).await.unwrap();
        repo.create(fields("b", None)).await.unwrap();

        let lists = repo.list().await.unwrap();
        let names: Vec<_> = lists.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert!(lists.iter().all(|l| l.items.is_none()));
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let pool = pool().await;
        let err = ListRepo::new(&pool)
            .update("missing", fields("x", None))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { resource: "list", .. }));
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let pool = pool().await;
        let repo = ListRepo::new(&pool);
        let list = repo.create(fields("Groceries", Some("weekly"))).await.unwrap();

        let updated = repo.update(&list.id, fields("Shopping", None)).await.unwrap();
        assert_eq!(updated.id, list.id);
        assert_eq!(updated.name, "Shopping");
        assert_eq!(updated.description, None);
    }

    #[tokio::test]
    async fn delete_cascades_to_items() {
        let pool = pool().await;
        let repo = ListRepo::new(&pool);
        let list = repo.create(fields("Groceries", None)).await.unwrap();

        let items = ItemRepo::new(&pool);
        let item_fields = ItemFields::from_payload(ItemPayload::named("Milk"), Utc::now()).unwrap();
        let item = items.create(&list.id, item_fields).await.unwrap();

        assert!(repo.delete(&list.id).await.unwrap());
        assert!(!repo.delete(&list.id).await.unwrap());

        assert!(matches!(
            items.get(&list.id, &item.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
        let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM Items")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
