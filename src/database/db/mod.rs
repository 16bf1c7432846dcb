pub mod connection;
pub mod migrate;
pub mod queries;

#[cfg(test)]
pub mod testing {
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use sqlx::{Pool, Sqlite};
    use std::str::FromStr;

    /// Fresh in-memory database with the full schema applied. Capped at a
    /// single connection: every pooled connection to `sqlite::memory:`
    /// would otherwise get its own private database.
    pub async fn memory_pool() -> Pool<Sqlite> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("parse memory url")
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("open in-memory sqlite");
        super::migrate::run_migrations(&pool)
            .await
            .expect("apply migrations");
        pool
    }
}
