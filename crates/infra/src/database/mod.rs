//! Database implementations

pub mod appointment_repository;
pub mod availability_repository;
pub mod manager;
pub mod waitlist_repository;

pub use appointment_repository::*;
pub use availability_repository::*;
pub use manager::*;
pub use waitlist_repository::*;

use slotwise_domain::SlotwiseError;

use crate::errors::InfraError;

pub(crate) fn map_sql_error(err: rusqlite::Error) -> SlotwiseError {
    InfraError::from(err).into()
}

pub(crate) fn map_join_error(err: tokio::task::JoinError) -> SlotwiseError {
    SlotwiseError::Internal(format!("blocking task failed: {err}"))
}

/// Parse a string-backed enum column, pinning conversion failures to the
/// column they came from.
pub(crate) fn parse_stored<T>(idx: usize, value: &str) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = SlotwiseError>,
{
    value.parse().map_err(|err: SlotwiseError| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(err),
        )
    })
}
