//! Rent transaction operations

use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool, sqlite::SqliteRow};

use crate::utils::*;
use rentra_types::prelude::*;
use rentra_types::store_adapter::{CreateTransaction, RentTransaction};

pub(crate) fn row_to_transaction(row: &SqliteRow) -> Result<RentTransaction, sqlx::Error> {
	let tenant_id: &str = row.try_get("tenant_id")?;
	Ok(RentTransaction {
		transaction_id: row.try_get("transaction_id")?,
		tenant_id: TenantId::from(tenant_id),
		rent_from: row.try_get("rent_from")?,
		rent_to: row.try_get("rent_to")?,
		payment_threshold: row.try_get("payment_threshold")?,
		payment_mode: row.try_get("payment_mode")?,
		client_id: row.try_get("client_id")?,
		property_id: row.try_get("property_id")?,
		agreement_id: row.try_get("agreement_id")?,
		owner_id: row.try_get("owner_id")?,
		created_at: row.try_get("created_at").map(Timestamp)?,
	})
}

const TRANSACTION_COLS: &str = "transaction_id, tenant_id, rent_from, rent_to, payment_threshold, \
	payment_mode, client_id, property_id, agreement_id, owner_id, created_at";

pub(crate) async fn create(
	db: &SqlitePool,
	data: &CreateTransaction<'_>,
) -> RtResult<RentTransaction> {
	let res = sqlx::query(
		"INSERT INTO transactions (tenant_id, rent_from, rent_to, payment_threshold, \
			payment_mode, client_id, property_id, agreement_id, owner_id) \
		VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
	)
	.bind(data.tenant_id)
	.bind(data.rent_from)
	.bind(data.rent_to)
	.bind(data.payment_threshold)
	.bind(data.payment_mode)
	.bind(data.client_id)
	.bind(data.property_id)
	.bind(data.agreement_id)
	.bind(data.owner_id)
	.execute(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	let scope = TenantScope::Scoped(TenantId::from(data.tenant_id));
	read(db, &scope, res.last_insert_rowid()).await
}

pub(crate) async fn read(
	db: &SqlitePool,
	scope: &TenantScope,
	transaction_id: i64,
) -> RtResult<RentTransaction> {
	let res = sqlx::query(&format!(
		"SELECT {TRANSACTION_COLS} FROM transactions \
		WHERE transaction_id = ?1 AND (?2 IS NULL OR tenant_id = ?2)",
	))
	.bind(transaction_id)
	.bind(scope.filter())
	.fetch_one(db)
	.await;
	map_res(res, row_to_transaction)
}

pub(crate) async fn list(db: &SqlitePool, scope: &TenantScope) -> RtResult<Vec<RentTransaction>> {
	let rows = sqlx::query(&format!(
		"SELECT {TRANSACTION_COLS} FROM transactions \
		WHERE (?1 IS NULL OR tenant_id = ?1) ORDER BY transaction_id",
	))
	.bind(scope.filter())
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;
	collect_rows(rows, row_to_transaction)
}

/// Transactions for a renter's identity set, crossing tenant boundaries
/// on purpose: the set was assembled from client records sharing the
/// caller's own email.
pub(crate) async fn list_for_clients(
	db: &SqlitePool,
	client_ids: &[i64],
) -> RtResult<Vec<RentTransaction>> {
	if client_ids.is_empty() {
		return Ok(Vec::new());
	}

	let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
		"SELECT {TRANSACTION_COLS} FROM transactions WHERE client_id IN (",
	));
	let mut ids = query.separated(", ");
	for client_id in client_ids {
		ids.push_bind(client_id);
	}
	query.push(") ORDER BY transaction_id");

	let rows = query
		.build()
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;
	collect_rows(rows, row_to_transaction)
}

pub(crate) async fn delete(
	db: &SqlitePool,
	scope: &TenantScope,
	transaction_id: i64,
) -> RtResult<()> {
	let res = sqlx::query(
		"DELETE FROM transactions WHERE transaction_id = ?1 AND (?2 IS NULL OR tenant_id = ?2)",
	)
	.bind(transaction_id)
	.bind(scope.filter())
	.execute(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

pub(crate) async fn delete_all(db: &SqlitePool, scope: &TenantScope) -> RtResult<u64> {
	let res = sqlx::query("DELETE FROM transactions WHERE (?1 IS NULL OR tenant_id = ?1)")
		.bind(scope.filter())
		.execute(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	Ok(res.rows_affected())
}

// vim: ts=4
