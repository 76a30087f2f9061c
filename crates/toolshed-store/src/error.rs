//! Mapping from `sqlx` failures to the core error type

use toolshed_core::Error;

/// Any database failure the caller cannot act on
pub(crate) fn db_error(err: sqlx::Error) -> Error {
    tracing::warn!(error = %err, "database operation failed");
    Error::storage(err.to_string())
}

/// Workshop insert failure; foreign key violations name the missing parent
pub(crate) fn insert_error(err: sqlx::Error, category_id: i32, host_id: i32) -> Error {
    let missing_parent = err
        .as_database_error()
        .filter(|db| db.is_foreign_key_violation())
        .map(|db| db.constraint().is_some_and(|c| c.contains("host_id")));

    match missing_parent {
        Some(true) => Error::InvalidReference {
            entity: "host",
            id: host_id,
        },
        Some(false) => Error::InvalidReference {
            entity: "category",
            id: category_id,
        },
        None => db_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_storage_errors() {
        let err = db_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, Error::Storage { .. }));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_insert_error_without_constraint_is_storage_error() {
        let err = insert_error(sqlx::Error::PoolTimedOut, 1, 1);
        assert!(matches!(err, Error::Storage { .. }));
    }
}
