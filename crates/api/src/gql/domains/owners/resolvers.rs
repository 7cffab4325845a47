use async_graphql::{Context, Object, Result, ID};
use uuid::Uuid;

use crate::gql::error::{GqlError, ResultExt};
use crate::gql::types::Owner;
use crate::state::AppState;
use infra::repos::{owners, CreateOwnerData, UpdateOwnerData};

#[derive(Default)]
pub struct OwnerQuery;

#[Object]
impl OwnerQuery {
    async fn all_owners(&self, ctx: &Context<'_>) -> Result<Vec<Owner>> {
        let state = ctx.data::<AppState>()?;
        let rows = owners::list(&state.db).await.map_err(GqlError::from)?;
        Ok(rows.into_iter().map(Owner::from).collect())
    }
}

#[derive(Default)]
pub struct OwnerMutation;

#[Object]
impl OwnerMutation {
    async fn create_owner(
        &self,
        ctx: &Context<'_>,
        first_name: String,
        username: String,
        last_name: Option<String>,
        email: Option<String>,
    ) -> Result<Owner> {
        let state = ctx.data::<AppState>()?;

        let data = CreateOwnerData {
            first_name,
            last_name,
            email,
            username,
        };

        let row = owners::create(&state.db, data)
            .await
            .map_err(GqlError::from)?;

        Ok(row.into())
    }

    /// `firstName` is required and always written; `email` is overwritten
    /// only when provided.
    async fn update_owner(
        &self,
        ctx: &Context<'_>,
        id: ID,
        first_name: String,
        email: Option<String>,
    ) -> Result<Owner> {
        let state = ctx.data::<AppState>()?;
        let owner_id = Uuid::parse_str(id.as_str()).gql_err("Invalid owner ID")?;

        let existing = owners::get_by_id(&state.db, owner_id)
            .await
            .map_err(GqlError::from)?;
        if existing.is_none() {
            return Err(async_graphql::Error::new("Owner not found"));
        }

        let data = UpdateOwnerData { first_name, email };

        let row = owners::update(&state.db, owner_id, data)
            .await
            .map_err(GqlError::from)?
            .ok_or_else(|| async_graphql::Error::new("Owner not found"))?;

        Ok(row.into())
    }

    /// Delete by id. Resolves to the removed owner's last-known snapshot,
    /// or null when the id does not exist.
    async fn delete_owner(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Owner>> {
        let state = ctx.data::<AppState>()?;
        let owner_id = Uuid::parse_str(id.as_str()).gql_err("Invalid owner ID")?;

        let row = owners::delete(&state.db, owner_id)
            .await
            .map_err(GqlError::from)?;

        Ok(row.map(Owner::from))
    }
}
