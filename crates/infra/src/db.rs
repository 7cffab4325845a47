/// Shared connection pool type used across repos and loaders.
pub type Db = sqlx::PgPool;
