use crate::error::StoreError;

/// Turns `RowNotFound` from a `fetch_one` into `Ok(None)`.
pub trait OptionalRow<T> {
    fn optional_row(self) -> Result<Option<T>, sqlx::Error>;
}

impl<T> OptionalRow<T> for Result<T, sqlx::Error> {
    fn optional_row(self) -> Result<Option<T>, sqlx::Error> {
        match self {
            Ok(row) => Ok(Some(row)),
            Err(sqlx::Error::RowNotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        let duplicate = e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());
        if duplicate {
            StoreError::AlreadyExists
        } else {
            StoreError::FetchFailed(e)
        }
    }
}
