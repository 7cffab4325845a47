use async_graphql::dataloader::Loader;
use infra::{db::Db, models::OwnerRow};
use std::{collections::HashMap, future::Future, sync::Arc};
use uuid::Uuid;

/// Batch-load the owner set of each company through the join table,
/// so `allCompanies { owners { … } }` costs one query per request.
#[derive(Clone)]
pub struct CompanyOwnersLoader {
    pool: Db,
}

impl CompanyOwnersLoader {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OwnershipRow {
    company_id: Uuid,
    #[sqlx(flatten)]
    owner: OwnerRow,
}

impl Loader<Uuid> for CompanyOwnersLoader {
    type Value = Vec<OwnerRow>;
    type Error = Arc<sqlx::Error>;

    fn load(
        &self,
        keys: &[Uuid],
    ) -> impl Future<Output = std::result::Result<HashMap<Uuid, Self::Value>, Self::Error>> + Send
    {
        let pool = self.pool.clone();
        let ids: Vec<Uuid> = keys.to_vec();

        async move {
            if ids.is_empty() {
                return Ok(HashMap::new());
            }

            let rows: Vec<OwnershipRow> = sqlx::query_as::<_, OwnershipRow>(
                r#"
                SELECT co.company_id, o.id, o.first_name, o.last_name, o.email, o.username
                FROM company_owners co
                JOIN owners o ON o.id = co.owner_id
                WHERE co.company_id = ANY($1::uuid[])
                ORDER BY o.username ASC
                "#,
            )
            .bind(&ids)
            .fetch_all(&pool)
            .await
            .map_err(Arc::new)?;

            let mut grouped: HashMap<Uuid, Vec<OwnerRow>> = HashMap::new();
            for row in rows {
                grouped.entry(row.company_id).or_default().push(row.owner);
            }

            Ok(grouped)
        }
    }
}
