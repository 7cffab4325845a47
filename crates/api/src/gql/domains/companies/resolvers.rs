use std::collections::HashSet;

use async_graphql::{Context, Object, Result, ID};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::gql::error::{GqlError, ResultExt};
use crate::gql::types::Company;
use crate::state::AppState;
use infra::repos::{companies, owners, CreateCompanyData, UpdateCompanyData};

#[derive(Default)]
pub struct CompanyQuery;

#[Object]
impl CompanyQuery {
    async fn all_companies(&self, ctx: &Context<'_>) -> Result<Vec<Company>> {
        let state = ctx.data::<AppState>()?;
        let rows = companies::list(&state.db).await.map_err(GqlError::from)?;
        Ok(rows.into_iter().map(Company::from).collect())
    }

    /// Exact-match lookup; resolves to null when no company has that name.
    async fn company_by_name(&self, ctx: &Context<'_>, name: String) -> Result<Option<Company>> {
        let state = ctx.data::<AppState>()?;
        let row = companies::get_by_name(&state.db, &name)
            .await
            .map_err(GqlError::from)?;
        Ok(row.map(Company::from))
    }
}

#[derive(Default)]
pub struct CompanyMutation;

#[Object]
impl CompanyMutation {
    /// Create a company. When `owners` is given, every id must resolve to an
    /// existing owner and becomes the company's owner set.
    async fn create_company(
        &self,
        ctx: &Context<'_>,
        name: String,
        address: Option<String>,
        owners: Option<Vec<ID>>,
        employee_size: Option<i32>,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Result<Company> {
        let state = ctx.data::<AppState>()?;

        let owner_ids = match &owners {
            Some(ids) => Some(resolve_owner_ids(state, ids).await?),
            None => None,
        };

        let data = CreateCompanyData {
            name,
            address,
            employee_size,
            created_at,
            updated_at,
        };

        let row = companies::create(&state.db, data, owner_ids.as_deref())
            .await
            .map_err(GqlError::from)?;

        Ok(row.into())
    }

    /// Partial update: arguments left null keep their stored values.
    /// A non-null `owners` list replaces the owner set wholesale.
    async fn update_company(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        address: Option<String>,
        owners: Option<Vec<ID>>,
        employee_size: Option<i32>,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Result<Company> {
        let state = ctx.data::<AppState>()?;
        let company_id = Uuid::parse_str(id.as_str()).gql_err("Invalid company ID")?;

        // Check the company exists before resolving owners, so a missing
        // company wins over a missing owner in the reported error.
        let existing = companies::get_by_id(&state.db, company_id)
            .await
            .map_err(GqlError::from)?;
        if existing.is_none() {
            return Err(async_graphql::Error::new("Company not found"));
        }

        let owner_ids = match &owners {
            Some(ids) => Some(resolve_owner_ids(state, ids).await?),
            None => None,
        };

        let data = UpdateCompanyData {
            name,
            address,
            employee_size,
            created_at,
            updated_at,
        };

        let row = companies::update(&state.db, company_id, data, owner_ids.as_deref())
            .await
            .map_err(GqlError::from)?
            .ok_or_else(|| async_graphql::Error::new("Company not found"))?;

        Ok(row.into())
    }

    /// Delete by id. Resolves to the removed company's last-known snapshot,
    /// or null when the id does not exist.
    async fn delete_company(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Company>> {
        let state = ctx.data::<AppState>()?;
        let company_id = Uuid::parse_str(id.as_str()).gql_err("Invalid company ID")?;

        let row = companies::delete(&state.db, company_id)
            .await
            .map_err(GqlError::from)?;

        Ok(row.map(Company::from))
    }
}

/// Parse and resolve a list of owner ids, erroring on the first id with no
/// matching row.
async fn resolve_owner_ids(state: &AppState, ids: &[ID]) -> Result<Vec<Uuid>> {
    let mut owner_ids = Vec::with_capacity(ids.len());
    for id in ids {
        owner_ids.push(Uuid::parse_str(id.as_str()).gql_err("Invalid owner ID")?);
    }

    let found: HashSet<Uuid> = owners::get_by_ids(&state.db, &owner_ids)
        .await
        .map_err(GqlError::from)?
        .into_iter()
        .map(|o| o.id)
        .collect();

    if let Some(missing) = owner_ids.iter().find(|id| !found.contains(id)) {
        return Err(async_graphql::Error::new(format!(
            "Owner not found: {missing}"
        )));
    }

    Ok(owner_ids)
}
