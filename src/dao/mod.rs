use once_cell::sync::OnceCell;
use sqlx::SqlitePool;
use std::sync::Arc;

pub static SQLITE_POOL: OnceCell<Arc<SqlitePool>> = OnceCell::new();

/// Initialize the global SqlitePool (async).
pub async fn init_sqlite_pool(db_url: &str) {
    let pool = SqlitePool::connect(db_url)
        .await
        .expect("Failed to create pool");
    SQLITE_POOL.set(Arc::new(pool)).ok();
}

pub mod api_key;

use tokio::fs;

/// Execute a SQL script against the given pool, one semicolon-separated
/// statement at a time.
pub async fn init_db(pool: &SqlitePool, sql_path: &str) -> anyhow::Result<()> {
    let sql = fs::read_to_string(sql_path).await?;
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt).execute(pool).await?;
        }
    }
    Ok(())
}
