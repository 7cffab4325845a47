use async_graphql::dataloader::DataLoader;
use async_graphql::{ComplexObject, Context, Result, SimpleObject, ID};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::gql::error::ResultExt;
use crate::gql::loaders::CompanyOwnersLoader;
use infra::models::{CompanyRow, OwnerRow};

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Company {
    pub id: ID,
    pub name: String,
    pub address: Option<String>,
    pub employee_size: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(SimpleObject, Clone)]
pub struct Owner {
    pub id: ID,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub username: String,
}

#[ComplexObject]
impl Company {
    /// Owner set of this company. Empty when the company has no owners —
    /// including the snapshot returned by `deleteCompany`, whose join rows
    /// are already gone.
    async fn owners(&self, ctx: &Context<'_>) -> Result<Vec<Owner>> {
        let company_id = Uuid::parse_str(self.id.as_str()).gql_err("Invalid company ID")?;

        let loader = ctx.data::<DataLoader<CompanyOwnersLoader>>()?;
        let rows = loader
            .load_one(company_id)
            .await
            .gql_err("Failed to load owners")?
            .unwrap_or_default();

        Ok(rows.into_iter().map(Owner::from).collect())
    }
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Company {
            id: row.id.into(),
            name: row.name,
            address: row.address,
            employee_size: row.employee_size,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<OwnerRow> for Owner {
    fn from(row: OwnerRow) -> Self {
        Owner {
            id: row.id.into(),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            username: row.username,
        }
    }
}
