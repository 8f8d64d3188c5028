use account_core_db::repository::RepositoryError;
use heapless::String as HeaplessString;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;
use std::str::FromStr;

/// A trait for converting a database row into a model.
pub trait TryFromRow<R>: Sized {
    /// Performs the conversion.
    fn try_from_row(row: &R) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

/// Retrieves a required `HeaplessString` from a row.
pub fn get_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> Result<HeaplessString<N>, Box<dyn Error + Send + Sync>> {
    let s: String = row.try_get(col_name)?;
    HeaplessString::from_str(&s).map_err(|_| {
        format!("Value for column '{col_name}' is too long (max {N} chars)").into()
    })
}

/// Translates a driver error into a store error.
///
/// Unique-constraint violations become `DuplicateKey` carrying `key`; every
/// other failure is passed through untouched.
pub fn map_sqlx_error(err: sqlx::Error, key: &str) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            tracing::warn!(
                key,
                constraint = db_err.constraint().unwrap_or_default(),
                "unique constraint violated"
            );
            RepositoryError::DuplicateKey(key.to_string())
        }
        other => RepositoryError::Database(Box::new(other)),
    }
}
