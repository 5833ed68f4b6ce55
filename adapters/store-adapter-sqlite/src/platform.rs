//! Platform-level users (SuperAdmin)

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::utils::*;
use rentra_types::prelude::*;
use rentra_types::store_adapter::PlatformUser;

fn row_to_platform_user(row: &SqliteRow) -> Result<PlatformUser, sqlx::Error> {
	Ok(PlatformUser {
		user_id: row.try_get("user_id")?,
		email: row.try_get("email")?,
		password_hash: row.try_get("password")?,
		role: Role::SuperAdmin,
		created_at: row.try_get("created_at").map(Timestamp)?,
	})
}

pub(crate) async fn read_by_email(db: &SqlitePool, email: &str) -> RtResult<PlatformUser> {
	let res = sqlx::query(
		"SELECT user_id, email, password, created_at FROM platform_users WHERE email = ?1",
	)
	.bind(email)
	.fetch_one(db)
	.await;
	map_res(res, row_to_platform_user)
}

pub(crate) async fn create(
	db: &SqlitePool,
	email: &str,
	password_hash: &str,
) -> RtResult<PlatformUser> {
	let res = sqlx::query("INSERT INTO platform_users (email, password) VALUES (?, ?)")
		.bind(email)
		.bind(password_hash)
		.execute(db)
		.await
		.map_err(|err| map_insert_err(err, "Platform user with this email already exists"))?;

	let id = res.last_insert_rowid();
	let res = sqlx::query(
		"SELECT user_id, email, password, created_at FROM platform_users WHERE user_id = ?1",
	)
	.bind(id)
	.fetch_one(db)
	.await;
	map_res(res, row_to_platform_user)
}

// vim: ts=4
