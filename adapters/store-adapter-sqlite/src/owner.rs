//! Owner (tenant-owning identity) operations

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::utils::*;
use rentra_types::prelude::*;
use rentra_types::store_adapter::{CreateOwner, Owner, UpdateOwner};

pub(crate) fn row_to_owner(row: &SqliteRow) -> Result<Owner, sqlx::Error> {
	let status: &str = row.try_get("subscription_status")?;
	let tenant_id: &str = row.try_get("tenant_id")?;
	Ok(Owner {
		owner_id: row.try_get("owner_id")?,
		tenant_id: TenantId::from(tenant_id),
		name: row.try_get("name")?,
		email: row.try_get("email")?,
		password_hash: row.try_get("password")?,
		phone: row.try_get("phone")?,
		alternate_phone: row.try_get("alternate_phone")?,
		national_id: row.try_get("national_id")?,
		tax_id: row.try_get("tax_id")?,
		address: row.try_get("address")?,
		city: row.try_get("city")?,
		state: row.try_get("state")?,
		pincode: row.try_get("pincode")?,
		company_name: row.try_get("company_name")?,
		business_type: row.try_get("business_type")?,
		gst_number: row.try_get("gst_number")?,
		bank_account_number: row.try_get("bank_account_number")?,
		ifsc_code: row.try_get("ifsc_code")?,
		bank_name: row.try_get("bank_name")?,
		role: Role::Owner,
		trial_start_date: row.try_get("trial_start_date").map(Timestamp)?,
		trial_end_date: row.try_get("trial_end_date").map(Timestamp)?,
		is_trial_active: row.try_get::<i64, _>("is_trial_active")? != 0,
		subscription_status: status
			.parse()
			.map_err(|_| sqlx::Error::Decode(format!("bad subscription status: {status}").into()))?,
		created_at: row.try_get("created_at").map(Timestamp)?,
	})
}

const OWNER_COLS: &str = "owner_id, tenant_id, name, email, password, phone, alternate_phone, \
	national_id, tax_id, address, city, state, pincode, company_name, business_type, gst_number, \
	bank_account_number, ifsc_code, bank_name, trial_start_date, trial_end_date, is_trial_active, \
	subscription_status, created_at";

pub(crate) async fn create(db: &SqlitePool, data: &CreateOwner<'_>) -> RtResult<Owner> {
	let res = sqlx::query(
		"INSERT INTO owners (tenant_id, name, email, password, phone, alternate_phone, \
			national_id, tax_id, address, city, state, pincode, company_name, business_type, \
			gst_number, bank_account_number, ifsc_code, bank_name, trial_start_date, \
			trial_end_date, is_trial_active, subscription_status) \
		VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?)",
	)
	.bind(data.tenant_id)
	.bind(data.name)
	.bind(data.email)
	.bind(data.password_hash)
	.bind(data.phone)
	.bind(data.alternate_phone)
	.bind(data.national_id)
	.bind(data.tax_id)
	.bind(data.address)
	.bind(data.city)
	.bind(data.state)
	.bind(data.pincode)
	.bind(data.company_name)
	.bind(data.business_type)
	.bind(data.gst_number)
	.bind(data.bank_account_number)
	.bind(data.ifsc_code)
	.bind(data.bank_name)
	.bind(data.trial_start_date.0)
	.bind(data.trial_end_date.0)
	.bind(data.subscription_status.to_string())
	.execute(db)
	.await
	.map_err(|err| map_insert_err(err, "Owner with this email or national id already exists"))?;

	read(db, res.last_insert_rowid()).await
}

pub(crate) async fn read(db: &SqlitePool, owner_id: i64) -> RtResult<Owner> {
	let res = sqlx::query(&format!("SELECT {OWNER_COLS} FROM owners WHERE owner_id = ?1"))
		.bind(owner_id)
		.fetch_one(db)
		.await;
	map_res(res, row_to_owner)
}

pub(crate) async fn read_by_email(db: &SqlitePool, email: &str) -> RtResult<Owner> {
	let res = sqlx::query(&format!("SELECT {OWNER_COLS} FROM owners WHERE email = ?1"))
		.bind(email)
		.fetch_one(db)
		.await;
	map_res(res, row_to_owner)
}

pub(crate) async fn read_by_tenant(db: &SqlitePool, tenant_id: &str) -> RtResult<Owner> {
	let res = sqlx::query(&format!("SELECT {OWNER_COLS} FROM owners WHERE tenant_id = ?1"))
		.bind(tenant_id)
		.fetch_one(db)
		.await;
	map_res(res, row_to_owner)
}

pub(crate) async fn exists(db: &SqlitePool, email: &str, national_id: &str) -> RtResult<bool> {
	let count: i64 = sqlx::query_scalar(
		"SELECT COUNT(*) FROM owners WHERE email = ?1 OR national_id = ?2",
	)
	.bind(email)
	.bind(national_id)
	.fetch_one(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	Ok(count > 0)
}

pub(crate) async fn list(db: &SqlitePool) -> RtResult<Vec<Owner>> {
	let rows = sqlx::query(&format!("SELECT {OWNER_COLS} FROM owners ORDER BY owner_id"))
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;
	collect_rows(rows, row_to_owner)
}

pub(crate) async fn update(
	db: &SqlitePool,
	owner_id: i64,
	data: &UpdateOwner<'_>,
) -> RtResult<Owner> {
	let res = sqlx::query(
		"UPDATE owners SET \
			name = COALESCE(?2, name), \
			email = COALESCE(?3, email), \
			phone = COALESCE(?4, phone), \
			password = COALESCE(?5, password), \
			subscription_status = COALESCE(?6, subscription_status) \
		WHERE owner_id = ?1",
	)
	.bind(owner_id)
	.bind(data.name)
	.bind(data.email)
	.bind(data.phone)
	.bind(data.password_hash)
	.bind(data.subscription_status.map(|s| s.to_string()))
	.execute(db)
	.await
	.map_err(|err| map_insert_err(err, "Owner with this email already exists"))?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	read(db, owner_id).await
}

pub(crate) async fn update_password(
	db: &SqlitePool,
	owner_id: i64,
	password_hash: &str,
) -> RtResult<()> {
	let res = sqlx::query("UPDATE owners SET password = ?2 WHERE owner_id = ?1")
		.bind(owner_id)
		.bind(password_hash)
		.execute(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

pub(crate) async fn delete(db: &SqlitePool, owner_id: i64) -> RtResult<()> {
	let res = sqlx::query("DELETE FROM owners WHERE owner_id = ?1")
		.bind(owner_id)
		.execute(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

/// Deletes every owner; reports the affected count (zero is not an error)
pub(crate) async fn delete_all(db: &SqlitePool) -> RtResult<u64> {
	let res = sqlx::query("DELETE FROM owners")
		.execute(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	Ok(res.rows_affected())
}

// vim: ts=4
