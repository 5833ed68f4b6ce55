//! Rent agreement operations
//!
//! Monetary terms are exact decimals persisted as text columns; they never
//! pass through floating point on the way in or out.

use rust_decimal::Decimal;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use std::str::FromStr;

use crate::utils::*;
use rentra_types::prelude::*;
use rentra_types::store_adapter::{CreateAgreement, RentAgreement, UpdateAgreement};

fn decimal_col(row: &SqliteRow, col: &str) -> Result<Decimal, sqlx::Error> {
	let raw: &str = row.try_get(col)?;
	Decimal::from_str(raw)
		.map_err(|err| sqlx::Error::Decode(format!("bad decimal in {col}: {err}").into()))
}

pub(crate) fn row_to_agreement(row: &SqliteRow) -> Result<RentAgreement, sqlx::Error> {
	let tenant_id: &str = row.try_get("tenant_id")?;
	Ok(RentAgreement {
		agreement_id: row.try_get("agreement_id")?,
		tenant_id: TenantId::from(tenant_id),
		electricity_meter_number: row.try_get("electricity_meter_number")?,
		monthly_rent: decimal_col(row, "monthly_rent")?,
		security_deposit_amount: decimal_col(row, "security_deposit_amount")?,
		increment_percentage: decimal_col(row, "increment_percentage")?,
		increment_schedule: decimal_col(row, "increment_schedule")?,
		payment_date: row.try_get("payment_date")?,
		payment_mode: row.try_get("payment_mode")?,
		client_id: row.try_get("client_id")?,
		property_id: row.try_get("property_id")?,
		owner_id: row.try_get("owner_id")?,
		created_at: row.try_get("created_at").map(Timestamp)?,
	})
}

const AGREEMENT_COLS: &str = "agreement_id, tenant_id, electricity_meter_number, monthly_rent, \
	security_deposit_amount, increment_percentage, increment_schedule, payment_date, payment_mode, \
	client_id, property_id, owner_id, created_at";

pub(crate) async fn create(db: &SqlitePool, data: &CreateAgreement<'_>) -> RtResult<RentAgreement> {
	let res = sqlx::query(
		"INSERT INTO agreements (tenant_id, electricity_meter_number, monthly_rent, \
			security_deposit_amount, increment_percentage, increment_schedule, payment_date, \
			payment_mode, client_id, property_id, owner_id) \
		VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
	)
	.bind(data.tenant_id)
	.bind(data.electricity_meter_number)
	.bind(data.monthly_rent.to_string())
	.bind(data.security_deposit_amount.to_string())
	.bind(data.increment_percentage.to_string())
	.bind(data.increment_schedule.to_string())
	.bind(data.payment_date)
	.bind(data.payment_mode)
	.bind(data.client_id)
	.bind(data.property_id)
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
	agreement_id: i64,
) -> RtResult<RentAgreement> {
	let res = sqlx::query(&format!(
		"SELECT {AGREEMENT_COLS} FROM agreements \
		WHERE agreement_id = ?1 AND (?2 IS NULL OR tenant_id = ?2)",
	))
	.bind(agreement_id)
	.bind(scope.filter())
	.fetch_one(db)
	.await;
	map_res(res, row_to_agreement)
}

pub(crate) async fn list(db: &SqlitePool, scope: &TenantScope) -> RtResult<Vec<RentAgreement>> {
	let rows = sqlx::query(&format!(
		"SELECT {AGREEMENT_COLS} FROM agreements \
		WHERE (?1 IS NULL OR tenant_id = ?1) ORDER BY agreement_id",
	))
	.bind(scope.filter())
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;
	collect_rows(rows, row_to_agreement)
}

pub(crate) async fn update(
	db: &SqlitePool,
	scope: &TenantScope,
	agreement_id: i64,
	data: &UpdateAgreement<'_>,
) -> RtResult<RentAgreement> {
	let res = sqlx::query(
		"UPDATE agreements SET \
			electricity_meter_number = COALESCE(?3, electricity_meter_number), \
			monthly_rent = COALESCE(?4, monthly_rent), \
			security_deposit_amount = COALESCE(?5, security_deposit_amount), \
			increment_percentage = COALESCE(?6, increment_percentage), \
			increment_schedule = COALESCE(?7, increment_schedule), \
			payment_date = COALESCE(?8, payment_date), \
			payment_mode = COALESCE(?9, payment_mode) \
		WHERE agreement_id = ?1 AND (?2 IS NULL OR tenant_id = ?2)",
	)
	.bind(agreement_id)
	.bind(scope.filter())
	.bind(data.electricity_meter_number)
	.bind(data.monthly_rent.map(|d| d.to_string()))
	.bind(data.security_deposit_amount.map(|d| d.to_string()))
	.bind(data.increment_percentage.map(|d| d.to_string()))
	.bind(data.increment_schedule.map(|d| d.to_string()))
	.bind(data.payment_date)
	.bind(data.payment_mode)
	.execute(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	read(db, scope, agreement_id).await
}

pub(crate) async fn delete(
	db: &SqlitePool,
	scope: &TenantScope,
	agreement_id: i64,
) -> RtResult<()> {
	let res = sqlx::query(
		"DELETE FROM agreements WHERE agreement_id = ?1 AND (?2 IS NULL OR tenant_id = ?2)",
	)
	.bind(agreement_id)
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
	let res = sqlx::query("DELETE FROM agreements WHERE (?1 IS NULL OR tenant_id = ?1)")
		.bind(scope.filter())
		.execute(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	Ok(res.rows_affected())
}

// vim: ts=4
