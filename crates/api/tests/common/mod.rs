use std::env;

use api::gql::schema::AppSchema;
use api::AppState;
use async_graphql::{Request, Variables};
use sqlx::postgres::PgPoolOptions;

/// Connect to the database named by `TEST_DATABASE_URL` and apply migrations.
/// Returns `None` when the variable is unset so DB-backed tests can skip
/// themselves on machines without a Postgres instance.
pub async fn try_setup_test_db() -> Option<AppState> {
    let database_url = env::var("TEST_DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(AppState::new(pool))
}

/// Helper function to execute GraphQL queries and mutations
#[allow(dead_code)]
pub async fn execute_graphql(
    schema: &AppSchema,
    query: &str,
    variables: Option<Variables>,
) -> async_graphql::Response {
    let mut request = Request::new(query);

    if let Some(vars) = variables {
        request = request.variables(vars);
    }

    schema.execute(request).await
}

/// Nanosecond suffix for unique names; tests share one database.
#[allow(dead_code)]
pub fn unique_suffix() -> i64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0)
}
