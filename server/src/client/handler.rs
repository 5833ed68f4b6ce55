//! Client (renter) endpoints

use axum::{
	Json,
	extract::{Path, State},
	http::StatusCode,
};
use serde::Deserialize;

use crate::auth::register::hash_password;
use crate::core::Auth;
use crate::core::policy::{self, Entity, Op};
use crate::core::scope::{resolve_scope, resolve_write_tenant};
use crate::prelude::*;
use crate::types::DeletedRes;
use rentra_types::store_adapter::{Client, CreateClient, UpdateClient};

/// # GET /api/clients
pub async fn get_clients(
	State(app): State<App>,
	Auth(auth): Auth,
) -> RtResult<(StatusCode, Json<Vec<Client>>)> {
	policy::check(auth.role, Entity::Client, Op::Read)?;
	let scope = resolve_scope(&auth)?;
	let clients = app.store_adapter.list_clients(&scope).await?;
	Ok((StatusCode::OK, Json(clients)))
}

/// # GET /api/clients/{id}
pub async fn get_client(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(client_id): Path<i64>,
) -> RtResult<(StatusCode, Json<Client>)> {
	policy::check(auth.role, Entity::Client, Op::Read)?;
	let scope = resolve_scope(&auth)?;
	let client = app.store_adapter.read_client(&scope, client_id).await?;
	Ok((StatusCode::OK, Json(client)))
}

/// # POST /api/clients
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientReq {
	name: String,
	gender: Option<String>,
	father_name: Option<String>,
	address1: Option<String>,
	address2: Option<String>,
	mobile_number: Option<String>,
	email: Option<String>,
	password: Option<String>,
	#[serde(rename = "tenant_id")]
	tenant_id: Option<String>,
}

pub async fn post_client(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(req): Json<CreateClientReq>,
) -> RtResult<(StatusCode, Json<Client>)> {
	policy::check(auth.role, Entity::Client, Op::Create)?;
	let tenant_id = resolve_write_tenant(&auth, req.tenant_id.as_deref())?;

	if req.name.trim().is_empty() {
		return Err(Error::ValidationError("Missing required field: name".into()));
	}

	let owner = app.store_adapter.read_owner_by_tenant(tenant_id.as_str()).await?;
	let email = req.email.as_deref().map(|e| e.trim().to_lowercase());
	let password_hash = match req.password.as_deref() {
		Some(password) => Some(hash_password(password).await?),
		None => None,
	};

	let client = app
		.store_adapter
		.create_client(&CreateClient {
			tenant_id: tenant_id.as_str(),
			name: req.name.trim(),
			gender: req.gender.as_deref(),
			father_name: req.father_name.as_deref(),
			address1: req.address1.as_deref(),
			address2: req.address2.as_deref(),
			mobile_number: req.mobile_number.as_deref(),
			email: email.as_deref(),
			password_hash: password_hash.as_deref(),
			owner_id: owner.owner_id,
		})
		.await?;

	Ok((StatusCode::CREATED, Json(client)))
}

/// # PUT /api/clients/{id}
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientReq {
	name: Option<String>,
	gender: Option<String>,
	father_name: Option<String>,
	address1: Option<String>,
	address2: Option<String>,
	mobile_number: Option<String>,
	email: Option<String>,
	password: Option<String>,
}

pub async fn put_client(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(client_id): Path<i64>,
	Json(req): Json<UpdateClientReq>,
) -> RtResult<(StatusCode, Json<Client>)> {
	policy::check(auth.role, Entity::Client, Op::Update)?;
	let scope = resolve_scope(&auth)?;

	let email = req.email.as_deref().map(|e| e.trim().to_lowercase());
	let password_hash = match req.password.as_deref() {
		Some(password) => Some(hash_password(password).await?),
		None => None,
	};

	let client = app
		.store_adapter
		.update_client(
			&scope,
			client_id,
			&UpdateClient {
				name: req.name.as_deref(),
				gender: req.gender.as_deref(),
				father_name: req.father_name.as_deref(),
				address1: req.address1.as_deref(),
				address2: req.address2.as_deref(),
				mobile_number: req.mobile_number.as_deref(),
				email: email.as_deref(),
				password_hash: password_hash.as_deref(),
			},
		)
		.await?;

	Ok((StatusCode::OK, Json(client)))
}

/// # DELETE /api/clients/{id}
pub async fn delete_client(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(client_id): Path<i64>,
) -> RtResult<StatusCode> {
	policy::check(auth.role, Entity::Client, Op::Delete)?;
	let scope = resolve_scope(&auth)?;
	app.store_adapter.delete_client(&scope, client_id).await?;
	Ok(StatusCode::NO_CONTENT)
}

/// # DELETE /api/clients
pub async fn delete_clients(
	State(app): State<App>,
	Auth(auth): Auth,
) -> RtResult<(StatusCode, Json<DeletedRes>)> {
	policy::check(auth.role, Entity::Client, Op::DeleteAll)?;
	let scope = resolve_scope(&auth)?;
	let deleted_count = app.store_adapter.delete_all_clients(&scope).await?;
	info!("Deleted {} clients in scope {:?}", deleted_count, scope.filter());
	Ok((StatusCode::OK, Json(DeletedRes { deleted_count })))
}

// vim: ts=4
