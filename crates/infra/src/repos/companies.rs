use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgExecutor, PgPool, Result};
use uuid::Uuid;

use crate::models::CompanyRow;

#[derive(Debug, Clone, Default)]
pub struct CreateCompanyData {
    pub name: String,
    pub address: Option<String>,
    pub employee_size: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update: `None` leaves the stored value untouched. An omitted
/// `updated_at` is refreshed to `now()` rather than kept.
#[derive(Debug, Clone, Default)]
pub struct UpdateCompanyData {
    pub name: Option<String>,
    pub address: Option<String>,
    pub employee_size: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<CompanyRow>> {
    sqlx::query_as::<_, CompanyRow>(
        r#"
        SELECT id, name, address, employee_size, created_at, updated_at
        FROM companies
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn get_by_id<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> Result<Option<CompanyRow>> {
    sqlx::query_as::<_, CompanyRow>(
        r#"
        SELECT id, name, address, employee_size, created_at, updated_at
        FROM companies
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn get_by_name<'e>(
    executor: impl PgExecutor<'e>,
    name: &str,
) -> Result<Option<CompanyRow>> {
    sqlx::query_as::<_, CompanyRow>(
        r#"
        SELECT id, name, address, employee_size, created_at, updated_at
        FROM companies
        WHERE name = $1
        LIMIT 1
        "#,
    )
    .bind(name)
    .fetch_optional(executor)
    .await
}

/// Insert a company and, when `owner_ids` is given, set its owner set in the
/// same transaction. Owner ids must already be validated; a dangling id
/// surfaces as a foreign-key error.
pub async fn create(
    db: &PgPool,
    data: CreateCompanyData,
    owner_ids: Option<&[Uuid]>,
) -> Result<CompanyRow> {
    let mut tx = db.begin().await?;

    let row = sqlx::query_as::<_, CompanyRow>(
        r#"
        INSERT INTO companies (name, address, employee_size, created_at, updated_at)
        VALUES ($1, $2, $3, COALESCE($4, now()), COALESCE($5, now()))
        RETURNING id, name, address, employee_size, created_at, updated_at
        "#,
    )
    .bind(&data.name)
    .bind(&data.address)
    .bind(data.employee_size)
    .bind(data.created_at)
    .bind(data.updated_at)
    .fetch_one(&mut *tx)
    .await?;

    if let Some(ids) = owner_ids {
        replace_owner_set(&mut tx, row.id, ids).await?;
    }

    tx.commit().await?;
    Ok(row)
}

/// Apply a partial update; returns `None` when the id does not exist.
/// When `owner_ids` is given the owner set is replaced wholesale, not
/// appended to.
pub async fn update(
    db: &PgPool,
    id: Uuid,
    data: UpdateCompanyData,
    owner_ids: Option<&[Uuid]>,
) -> Result<Option<CompanyRow>> {
    let mut tx = db.begin().await?;

    let row = sqlx::query_as::<_, CompanyRow>(
        r#"
        UPDATE companies
        SET name = COALESCE($2, name),
            address = COALESCE($3, address),
            employee_size = COALESCE($4, employee_size),
            created_at = COALESCE($5, created_at),
            updated_at = COALESCE($6, now())
        WHERE id = $1
        RETURNING id, name, address, employee_size, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.address)
    .bind(data.employee_size)
    .bind(data.created_at)
    .bind(data.updated_at)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    if let Some(ids) = owner_ids {
        replace_owner_set(&mut tx, row.id, ids).await?;
    }

    tx.commit().await?;
    Ok(Some(row))
}

/// Delete by id, returning the removed row as a last-known snapshot.
pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<Option<CompanyRow>> {
    sqlx::query_as::<_, CompanyRow>(
        r#"
        DELETE FROM companies
        WHERE id = $1
        RETURNING id, name, address, employee_size, created_at, updated_at
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

async fn replace_owner_set(
    conn: &mut PgConnection,
    company_id: Uuid,
    owner_ids: &[Uuid],
) -> Result<()> {
    sqlx::query("DELETE FROM company_owners WHERE company_id = $1")
        .bind(company_id)
        .execute(&mut *conn)
        .await?;

    if !owner_ids.is_empty() {
        sqlx::query(
            r#"
            INSERT INTO company_owners (company_id, owner_id)
            SELECT $1, o.owner_id
            FROM UNNEST($2::uuid[]) AS o(owner_id)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(company_id)
        .bind(owner_ids)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
