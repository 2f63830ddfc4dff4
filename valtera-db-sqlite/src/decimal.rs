use rust_decimal::Decimal;
use sqlx::{Row, TypeInfo, ValueRef};
use valtera_core::RepositoryError;

/// Get a decimal value from a row, handling TEXT, INTEGER and REAL SQLite types.
///
/// Amounts are written as TEXT so they round-trip exactly; numeric storage
/// classes are accepted for hand-edited databases.
pub fn get_decimal(
    row: &sqlx::sqlite::SqliteRow,
    column: &str,
) -> Result<Decimal, RepositoryError> {
    let value_ref = row
        .try_get_raw(column)
        .map_err(|e| RepositoryError::Database(format!("Column '{}' not found: {}", column, e)))?;

    let type_info = value_ref.type_info();
    let type_name = type_info.name();

    match type_name {
        "TEXT" => {
            let val: String = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!("Failed to get TEXT from '{}': {}", column, e))
            })?;
            val.trim().parse::<Decimal>().map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to parse decimal '{}' in '{}': {}",
                    val, column, e
                ))
            })
        }
        "INTEGER" => {
            let val: i64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to get INTEGER from '{}': {}",
                    column, e
                ))
            })?;
            Ok(Decimal::from(val))
        }
        "REAL" => {
            let val: f64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!("Failed to get REAL from '{}': {}", column, e))
            })?;
            Decimal::try_from(val).map_err(|e| {
                RepositoryError::Database(format!("Failed to convert {} to Decimal: {}", val, e))
            })
        }
        _ => Err(RepositoryError::Database(format!(
            "Unexpected type '{}' for column '{}'",
            type_name, column
        ))),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn create_test_table(pool: &sqlx::sqlite::SqlitePool) {
        sqlx::query(
            "CREATE TABLE test_decimals (
                id INTEGER PRIMARY KEY,
                text_value TEXT,
                int_value INTEGER,
                real_value REAL,
                null_value TEXT
            )",
        )
        .execute(pool)
        .await
        .expect("Failed to create test table");
    }

    async fn setup_test_db() -> sqlx::sqlite::SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        create_test_table(&pool).await;
        pool
    }

    async fn fetch_column(
        pool: &sqlx::sqlite::SqlitePool,
        insert: &str,
        column: &str,
    ) -> Result<Decimal, RepositoryError> {
        sqlx::query(insert)
            .execute(pool)
            .await
            .expect("Failed to insert test data");

        let row = sqlx::query(&format!("SELECT {column} FROM test_decimals WHERE id = 1"))
            .fetch_one(pool)
            .await
            .expect("Failed to fetch row");

        get_decimal(&row, column)
    }

    #[tokio::test]
    async fn test_get_decimal_from_text() {
        let pool = setup_test_db().await;

        let result = fetch_column(
            &pool,
            "INSERT INTO test_decimals (id, text_value) VALUES (1, '0.16')",
            "text_value",
        )
        .await;

        assert_eq!(result.unwrap(), dec!(0.16));
    }

    #[tokio::test]
    async fn test_get_decimal_from_integer() {
        let pool = setup_test_db().await;

        let result = fetch_column(
            &pool,
            "INSERT INTO test_decimals (id, int_value) VALUES (1, 18200)",
            "int_value",
        )
        .await;

        assert_eq!(result.unwrap(), dec!(18200));
    }

    #[tokio::test]
    async fn test_get_decimal_from_real() {
        let pool = setup_test_db().await;

        let result = fetch_column(
            &pool,
            "INSERT INTO test_decimals (id, real_value) VALUES (1, 0.5)",
            "real_value",
        )
        .await;

        assert_eq!(result.unwrap(), dec!(0.5));
    }

    #[tokio::test]
    async fn test_get_decimal_rejects_unparseable_text() {
        let pool = setup_test_db().await;

        let result = fetch_column(
            &pool,
            "INSERT INTO test_decimals (id, text_value) VALUES (1, 'sixteen')",
            "text_value",
        )
        .await;

        assert!(matches!(result, Err(RepositoryError::Database(_))));
    }

    #[tokio::test]
    async fn test_get_decimal_rejects_null() {
        let pool = setup_test_db().await;

        let result = fetch_column(
            &pool,
            "INSERT INTO test_decimals (id) VALUES (1)",
            "null_value",
        )
        .await;

        assert!(matches!(result, Err(RepositoryError::Database(_))));
    }
}
