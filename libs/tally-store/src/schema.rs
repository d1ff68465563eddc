//! Schema bootstrap
//!
//! Runs unconditionally at startup, before any front-end. The formatted
//! timestamp is the primary key; same-second collisions are constraint
//! violations, never merges.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::Result;

const CREATE_CALCULATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS calculations (
    ts        TEXT PRIMARY KEY,
    operand1  REAL NOT NULL,
    operator  TEXT NOT NULL,
    operand2  REAL NOT NULL,
    result    REAL NOT NULL
)
"#;

/// Create the calculations table if it does not exist
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(CREATE_CALCULATIONS).execute(pool).await?;
    debug!("calculations table ready");
    Ok(())
}
