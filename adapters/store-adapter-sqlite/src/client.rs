//! Client (renter) operations
//!
//! Every query here binds the caller's tenant scope; a `Scoped` caller can
//! never reach another tenant's row even with a valid client id.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::utils::*;
use rentra_types::prelude::*;
use rentra_types::store_adapter::{Client, CreateClient, UpdateClient};

pub(crate) fn row_to_client(row: &SqliteRow) -> Result<Client, sqlx::Error> {
	let tenant_id: &str = row.try_get("tenant_id")?;
	Ok(Client {
		client_id: row.try_get("client_id")?,
		tenant_id: TenantId::from(tenant_id),
		name: row.try_get("name")?,
		gender: row.try_get("gender")?,
		father_name: row.try_get("father_name")?,
		address1: row.try_get("address1")?,
		address2: row.try_get("address2")?,
		mobile_number: row.try_get("mobile_number")?,
		email: row.try_get("email")?,
		password_hash: row.try_get("password")?,
		role: Role::ClientMaster,
		owner_id: row.try_get("owner_id")?,
		created_at: row.try_get("created_at").map(Timestamp)?,
	})
}

const CLIENT_COLS: &str = "client_id, tenant_id, name, gender, father_name, address1, address2, \
	mobile_number, email, password, owner_id, created_at";

pub(crate) async fn create(db: &SqlitePool, data: &CreateClient<'_>) -> RtResult<Client> {
	let res = sqlx::query(
		"INSERT INTO clients (tenant_id, name, gender, father_name, address1, address2, \
			mobile_number, email, password, owner_id) \
		VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
	)
	.bind(data.tenant_id)
	.bind(data.name)
	.bind(data.gender)
	.bind(data.father_name)
	.bind(data.address1)
	.bind(data.address2)
	.bind(data.mobile_number)
	.bind(data.email)
	.bind(data.password_hash)
	.bind(data.owner_id)
	.execute(db)
	.await
	.map_err(|err| map_insert_err(err, "Client with this email already exists for this owner"))?;

	let id = res.last_insert_rowid();
	let scope = TenantScope::Scoped(TenantId::from(data.tenant_id));
	read(db, &scope, id).await
}

pub(crate) async fn read(db: &SqlitePool, scope: &TenantScope, client_id: i64) -> RtResult<Client> {
	let res = sqlx::query(&format!(
		"SELECT {CLIENT_COLS} FROM clients WHERE client_id = ?1 AND (?2 IS NULL OR tenant_id = ?2)",
	))
	.bind(client_id)
	.bind(scope.filter())
	.fetch_one(db)
	.await;
	map_res(res, row_to_client)
}

pub(crate) async fn read_by_email(
	db: &SqlitePool,
	scope: &TenantScope,
	email: &str,
) -> RtResult<Option<Client>> {
	// an email may match several tenants under an unrestricted scope;
	// the oldest record wins
	let row = sqlx::query(&format!(
		"SELECT {CLIENT_COLS} FROM clients WHERE email = ?1 AND (?2 IS NULL OR tenant_id = ?2) \
		ORDER BY client_id LIMIT 1",
	))
	.bind(email)
	.bind(scope.filter())
	.fetch_optional(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	match row {
		Some(ref row) => Ok(Some(
			row_to_client(row).inspect_err(inspect).map_err(|_| Error::DbError)?,
		)),
		None => Ok(None),
	}
}

pub(crate) async fn list(db: &SqlitePool, scope: &TenantScope) -> RtResult<Vec<Client>> {
	let rows = sqlx::query(&format!(
		"SELECT {CLIENT_COLS} FROM clients WHERE (?1 IS NULL OR tenant_id = ?1) ORDER BY client_id",
	))
	.bind(scope.filter())
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;
	collect_rows(rows, row_to_client)
}

/// All client ids sharing an email, across tenant boundaries. Used to
/// assemble the identity set for a renter who exists under several owners.
pub(crate) async fn list_ids_by_email(db: &SqlitePool, email: &str) -> RtResult<Vec<i64>> {
	sqlx::query_scalar("SELECT client_id FROM clients WHERE email = ?1 ORDER BY client_id")
		.bind(email)
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))
}

pub(crate) async fn update(
	db: &SqlitePool,
	scope: &TenantScope,
	client_id: i64,
	data: &UpdateClient<'_>,
) -> RtResult<Client> {
	let res = sqlx::query(
		"UPDATE clients SET \
			name = COALESCE(?3, name), \
			gender = COALESCE(?4, gender), \
			father_name = COALESCE(?5, father_name), \
			address1 = COALESCE(?6, address1), \
			address2 = COALESCE(?7, address2), \
			mobile_number = COALESCE(?8, mobile_number), \
			email = COALESCE(?9, email), \
			password = COALESCE(?10, password) \
		WHERE client_id = ?1 AND (?2 IS NULL OR tenant_id = ?2)",
	)
	.bind(client_id)
	.bind(scope.filter())
	.bind(data.name)
	.bind(data.gender)
	.bind(data.father_name)
	.bind(data.address1)
	.bind(data.address2)
	.bind(data.mobile_number)
	.bind(data.email)
	.bind(data.password_hash)
	.execute(db)
	.await
	.map_err(|err| map_insert_err(err, "Client with this email already exists for this owner"))?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	read(db, scope, client_id).await
}

pub(crate) async fn update_password(
	db: &SqlitePool,
	client_id: i64,
	password_hash: &str,
) -> RtResult<()> {
	let res = sqlx::query("UPDATE clients SET password = ?2 WHERE client_id = ?1")
		.bind(client_id)
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

pub(crate) async fn delete(db: &SqlitePool, scope: &TenantScope, client_id: i64) -> RtResult<()> {
	let res = sqlx::query("DELETE FROM clients WHERE client_id = ?1 AND (?2 IS NULL OR tenant_id = ?2)")
		.bind(client_id)
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
	let res = sqlx::query("DELETE FROM clients WHERE (?1 IS NULL OR tenant_id = ?1)")
		.bind(scope.filter())
		.execute(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	Ok(res.rows_affected())
}

// vim: ts=4
