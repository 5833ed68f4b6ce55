//! Utility functions for database operations

use sqlx::sqlite::SqliteRow;

use rentra_types::prelude::*;

/// Log database errors
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Map a storage-layer uniqueness violation to `Conflict`, everything
/// else to `DbError`. The unique indexes are the mechanism that closes
/// the check-then-insert race on registration.
pub(crate) fn map_insert_err(err: sqlx::Error, conflict_msg: &str) -> Error {
	if let sqlx::Error::Database(ref dbe) = err {
		if dbe.is_unique_violation() {
			return Error::Conflict(conflict_msg.into());
		}
	}
	inspect(&err);
	Error::DbError
}

/// Map a query result to a value using a closure
pub(crate) fn map_res<T, F>(row: Result<SqliteRow, sqlx::Error>, f: F) -> RtResult<T>
where
	F: FnOnce(&SqliteRow) -> Result<T, sqlx::Error>,
{
	match row {
		Ok(ref row) => f(row).inspect_err(inspect).map_err(|_| Error::DbError),
		Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

/// Collect row results into a vector using a mapping closure
pub(crate) fn collect_rows<T, F>(rows: Vec<SqliteRow>, f: F) -> RtResult<Vec<T>>
where
	F: Fn(&SqliteRow) -> Result<T, sqlx::Error>,
{
	let mut items = Vec::with_capacity(rows.len());
	for row in &rows {
		items.push(f(row).inspect_err(inspect).map_err(|_| Error::DbError)?);
	}
	Ok(items)
}

// vim: ts=4
