//! Property operations

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::utils::*;
use rentra_types::prelude::*;
use rentra_types::store_adapter::{CreateProperty, Property, UpdateProperty};

pub(crate) fn row_to_property(row: &SqliteRow) -> Result<Property, sqlx::Error> {
	let tenant_id: &str = row.try_get("tenant_id")?;
	Ok(Property {
		property_id: row.try_get("property_id")?,
		tenant_id: TenantId::from(tenant_id),
		pincode: row.try_get("pincode")?,
		address1: row.try_get("address1")?,
		address2: row.try_get("address2")?,
		city: row.try_get("city")?,
		state: row.try_get("state")?,
		owner_id: row.try_get("owner_id")?,
		created_at: row.try_get("created_at").map(Timestamp)?,
	})
}

const PROPERTY_COLS: &str =
	"property_id, tenant_id, pincode, address1, address2, city, state, owner_id, created_at";

pub(crate) async fn create(db: &SqlitePool, data: &CreateProperty<'_>) -> RtResult<Property> {
	let res = sqlx::query(
		"INSERT INTO properties (tenant_id, pincode, address1, address2, city, state, owner_id) \
		VALUES (?, ?, ?, ?, ?, ?, ?)",
	)
	.bind(data.tenant_id)
	.bind(data.pincode)
	.bind(data.address1)
	.bind(data.address2)
	.bind(data.city)
	.bind(data.state)
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
	property_id: i64,
) -> RtResult<Property> {
	let res = sqlx::query(&format!(
		"SELECT {PROPERTY_COLS} FROM properties \
		WHERE property_id = ?1 AND (?2 IS NULL OR tenant_id = ?2)",
	))
	.bind(property_id)
	.bind(scope.filter())
	.fetch_one(db)
	.await;
	map_res(res, row_to_property)
}

pub(crate) async fn list(db: &SqlitePool, scope: &TenantScope) -> RtResult<Vec<Property>> {
	let rows = sqlx::query(&format!(
		"SELECT {PROPERTY_COLS} FROM properties \
		WHERE (?1 IS NULL OR tenant_id = ?1) ORDER BY property_id",
	))
	.bind(scope.filter())
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;
	collect_rows(rows, row_to_property)
}

pub(crate) async fn update(
	db: &SqlitePool,
	scope: &TenantScope,
	property_id: i64,
	data: &UpdateProperty<'_>,
) -> RtResult<Property> {
	let res = sqlx::query(
		"UPDATE properties SET \
			pincode = COALESCE(?3, pincode), \
			address1 = COALESCE(?4, address1), \
			address2 = COALESCE(?5, address2), \
			city = COALESCE(?6, city), \
			state = COALESCE(?7, state) \
		WHERE property_id = ?1 AND (?2 IS NULL OR tenant_id = ?2)",
	)
	.bind(property_id)
	.bind(scope.filter())
	.bind(data.pincode)
	.bind(data.address1)
	.bind(data.address2)
	.bind(data.city)
	.bind(data.state)
	.execute(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	read(db, scope, property_id).await
}

pub(crate) async fn delete(
	db: &SqlitePool,
	scope: &TenantScope,
	property_id: i64,
) -> RtResult<()> {
	let res = sqlx::query(
		"DELETE FROM properties WHERE property_id = ?1 AND (?2 IS NULL OR tenant_id = ?2)",
	)
	.bind(property_id)
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
	let res = sqlx::query("DELETE FROM properties WHERE (?1 IS NULL OR tenant_id = ?1)")
		.bind(scope.filter())
		.execute(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	Ok(res.rows_affected())
}

// vim: ts=4
