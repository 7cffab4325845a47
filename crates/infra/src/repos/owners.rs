use sqlx::{PgExecutor, Result};
use uuid::Uuid;

use crate::models::OwnerRow;

#[derive(Debug, Clone)]
pub struct CreateOwnerData {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub username: String,
}

/// `first_name` is always written; `email` only when provided.
#[derive(Debug, Clone)]
pub struct UpdateOwnerData {
    pub first_name: String,
    pub email: Option<String>,
}

pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<OwnerRow>> {
    sqlx::query_as::<_, OwnerRow>(
        r#"
        SELECT id, first_name, last_name, email, username
        FROM owners
        ORDER BY username ASC
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<Option<OwnerRow>> {
    sqlx::query_as::<_, OwnerRow>(
        r#"
        SELECT id, first_name, last_name, email, username
        FROM owners
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn get_by_ids<'e>(
    executor: impl PgExecutor<'e>,
    ids: &[Uuid],
) -> Result<Vec<OwnerRow>> {
    sqlx::query_as::<_, OwnerRow>(
        r#"
        SELECT id, first_name, last_name, email, username
        FROM owners
        WHERE id = ANY($1::uuid[])
        "#,
    )
    .bind(ids)
    .fetch_all(executor)
    .await
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, data: CreateOwnerData) -> Result<OwnerRow> {
    sqlx::query_as::<_, OwnerRow>(
        r#"
        INSERT INTO owners (first_name, last_name, email, username)
        VALUES ($1, $2, $3, $4)
        RETURNING id, first_name, last_name, email, username
        "#,
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(&data.username)
    .fetch_one(executor)
    .await
}

/// Returns `None` when the id does not exist.
pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    data: UpdateOwnerData,
) -> Result<Option<OwnerRow>> {
    sqlx::query_as::<_, OwnerRow>(
        r#"
        UPDATE owners
        SET first_name = $2,
            email = COALESCE($3, email)
        WHERE id = $1
        RETURNING id, first_name, last_name, email, username
        "#,
    )
    .bind(id)
    .bind(&data.first_name)
    .bind(&data.email)
    .fetch_optional(executor)
    .await
}

/// Delete by id, returning the removed row as a last-known snapshot.
pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<Option<OwnerRow>> {
    sqlx::query_as::<_, OwnerRow>(
        r#"
        DELETE FROM owners
        WHERE id = $1
        RETURNING id, first_name, last_name, email, username
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}
