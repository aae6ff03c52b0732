//! Diesel and pool error mapping shared by the record repositories.
//!
//! Every repository port error exposes `connection` and `query`
//! constructors, so the helpers take those constructors as arguments rather
//! than knowing each error type.

use tracing::{debug, warn};

use super::pool::PoolError;

/// Map pool errors onto a repository's connection constructor.
pub fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel errors onto a repository's query and connection constructors.
///
/// Closed connections surface as connection failures so the HTTP layer can
/// answer 503; everything else is a query failure with a generic message.
pub fn map_diesel_error<E>(
    error: diesel::result::Error,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("referenced organization does not exist")
        }
        _ => query("database error"),
    }
}

/// Report a stored row that no longer satisfies domain validation.
pub fn map_corrupt_row<E>(
    table: &'static str,
    id: uuid::Uuid,
    reason: impl std::fmt::Display,
    query: impl FnOnce(String) -> E,
) -> E {
    warn!(table, %id, %reason, "stored row failed domain validation");
    query(format!("corrupt {table} row {id}"))
}

/// Convert a domain count into the database's `INTEGER` representation.
///
/// Counts beyond `i32::MAX` are refused rather than clamped so the stored
/// row never differs from the record handed back to the caller.
pub fn count_to_db<E>(
    column: &'static str,
    value: u32,
    query: impl FnOnce(String) -> E,
) -> Result<i32, E> {
    i32::try_from(value).map_err(|_| query(format!("{column} {value} exceeds the column range")))
}

/// Convert an optional listing limit into a SQL `LIMIT`.
pub fn limit_to_db(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{ActivityRepositoryError, EnergyRepositoryError};

    #[derive(Debug)]
    struct Info(&'static str);

    impl diesel::result::DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn map(error: DieselError) -> ActivityRepositoryError {
        map_diesel_error(
            error,
            ActivityRepositoryError::query,
            ActivityRepositoryError::connection,
        )
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(
            PoolError::checkout("connection refused"),
            ActivityRepositoryError::connection,
        );
        assert!(matches!(err, ActivityRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, Box::new(Info("fk"))),
        "referenced organization does not exist"
    )]
    #[case(
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(Info("dup"))),
        "database error"
    )]
    fn diesel_errors_map_to_query_errors(#[case] error: DieselError, #[case] message: &str) {
        let err = map(error);
        assert_eq!(err, ActivityRepositoryError::query(message));
    }

    #[rstest]
    fn closed_connections_map_to_connection_errors() {
        let err = map(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(Info("server closed the connection")),
        ));
        assert!(matches!(err, ActivityRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn corrupt_rows_hide_the_reason() {
        let id = uuid::Uuid::nil();
        let err = map_corrupt_row("goals", id, "title empty", ActivityRepositoryError::query);
        assert_eq!(
            err.to_string(),
            format!("activity repository query failed: corrupt goals row {id}")
        );
    }

    #[rstest]
    #[case(0, Some(0))]
    #[case(42, Some(42))]
    #[case(i32::MAX.unsigned_abs(), Some(i32::MAX))]
    #[case(u32::MAX, None)]
    fn counts_beyond_the_column_range_are_refused(
        #[case] value: u32,
        #[case] expected: Option<i32>,
    ) {
        let result = count_to_db("num_people", value, EnergyRepositoryError::query);
        assert_eq!(result.ok(), expected);
    }
}
