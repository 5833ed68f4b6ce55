//! Owner account administration (platform level)

use axum::{
	Json,
	extract::{Path, State},
	http::StatusCode,
};
use serde::Deserialize;

use crate::auth::register::{self, RegisterReq};
use crate::core::Auth;
use crate::core::policy::{self, Entity, Op};
use crate::prelude::*;
use crate::types::DeletedRes;
use rentra_types::store_adapter::{Owner, SubscriptionStatus, UpdateOwner};

/// # GET /api/owners
pub async fn get_owners(
	State(app): State<App>,
	Auth(auth): Auth,
) -> RtResult<(StatusCode, Json<Vec<Owner>>)> {
	policy::check(auth.role, Entity::Owner, Op::Read)?;
	let owners = app.store_adapter.list_owners().await?;
	Ok((StatusCode::OK, Json(owners)))
}

/// # GET /api/owners/{id}
pub async fn get_owner(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(owner_id): Path<i64>,
) -> RtResult<(StatusCode, Json<Owner>)> {
	policy::check(auth.role, Entity::Owner, Op::Read)?;
	let owner = app.store_adapter.read_owner(owner_id).await?;
	Ok((StatusCode::OK, Json(owner)))
}

/// # POST /api/owners
///
/// Platform-administered creation runs the same workflow as
/// self-registration, generated tenant partition included.
pub async fn post_owner(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(req): Json<RegisterReq>,
) -> RtResult<(StatusCode, Json<Owner>)> {
	policy::check(auth.role, Entity::Owner, Op::Create)?;
	let owner = register::create_owner_account(&app, &req).await?;
	Ok((StatusCode::CREATED, Json(owner)))
}

/// # PUT /api/owners/{id}
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOwnerReq {
	name: Option<String>,
	email: Option<String>,
	phone: Option<String>,
	subscription_status: Option<SubscriptionStatus>,
}

pub async fn put_owner(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(owner_id): Path<i64>,
	Json(req): Json<UpdateOwnerReq>,
) -> RtResult<(StatusCode, Json<Owner>)> {
	policy::check(auth.role, Entity::Owner, Op::Update)?;

	let email = req.email.map(|e| e.trim().to_lowercase());
	let owner = app
		.store_adapter
		.update_owner(
			owner_id,
			&UpdateOwner {
				name: req.name.as_deref(),
				email: email.as_deref(),
				phone: req.phone.as_deref(),
				password_hash: None,
				subscription_status: req.subscription_status,
			},
		)
		.await?;

	Ok((StatusCode::OK, Json(owner)))
}

/// # DELETE /api/owners/{id}
pub async fn delete_owner(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(owner_id): Path<i64>,
) -> RtResult<StatusCode> {
	policy::check(auth.role, Entity::Owner, Op::Delete)?;
	app.store_adapter.delete_owner(owner_id).await?;
	info!("Deleted owner {}", owner_id);
	Ok(StatusCode::NO_CONTENT)
}

/// # DELETE /api/owners
pub async fn delete_owners(
	State(app): State<App>,
	Auth(auth): Auth,
) -> RtResult<(StatusCode, Json<DeletedRes>)> {
	policy::check(auth.role, Entity::Owner, Op::DeleteAll)?;
	let deleted_count = app.store_adapter.delete_all_owners().await?;
	warn!("Deleted all owners ({})", deleted_count);
	Ok((StatusCode::OK, Json(DeletedRes { deleted_count })))
}

// vim: ts=4
