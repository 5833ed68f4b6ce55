//! Property endpoints

use axum::{
	Json,
	extract::{Path, State},
	http::StatusCode,
};
use serde::Deserialize;

use crate::core::Auth;
use crate::core::policy::{self, Entity, Op};
use crate::core::scope::{resolve_scope, resolve_write_tenant};
use crate::prelude::*;
use crate::types::DeletedRes;
use rentra_types::store_adapter::{CreateProperty, Property, UpdateProperty};

/// # GET /api/properties
pub async fn get_properties(
	State(app): State<App>,
	Auth(auth): Auth,
) -> RtResult<(StatusCode, Json<Vec<Property>>)> {
	policy::check(auth.role, Entity::Property, Op::Read)?;
	let scope = resolve_scope(&auth)?;
	let properties = app.store_adapter.list_properties(&scope).await?;
	Ok((StatusCode::OK, Json(properties)))
}

/// # GET /api/properties/{id}
pub async fn get_property(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(property_id): Path<i64>,
) -> RtResult<(StatusCode, Json<Property>)> {
	policy::check(auth.role, Entity::Property, Op::Read)?;
	let scope = resolve_scope(&auth)?;
	let property = app.store_adapter.read_property(&scope, property_id).await?;
	Ok((StatusCode::OK, Json(property)))
}

/// # POST /api/properties
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyReq {
	pincode: String,
	address1: String,
	address2: String,
	city: String,
	state: String,
	#[serde(rename = "tenant_id")]
	tenant_id: Option<String>,
}

pub async fn post_property(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(req): Json<CreatePropertyReq>,
) -> RtResult<(StatusCode, Json<Property>)> {
	policy::check(auth.role, Entity::Property, Op::Create)?;
	let tenant_id = resolve_write_tenant(&auth, req.tenant_id.as_deref())?;

	for (field, value) in [
		("pincode", &req.pincode),
		("address1", &req.address1),
		("city", &req.city),
		("state", &req.state),
	] {
		if value.trim().is_empty() {
			return Err(Error::ValidationError(format!("Missing required field: {}", field)));
		}
	}

	let owner = app.store_adapter.read_owner_by_tenant(tenant_id.as_str()).await?;

	let property = app
		.store_adapter
		.create_property(&CreateProperty {
			tenant_id: tenant_id.as_str(),
			pincode: &req.pincode,
			address1: &req.address1,
			address2: &req.address2,
			city: &req.city,
			state: &req.state,
			owner_id: owner.owner_id,
		})
		.await?;

	Ok((StatusCode::CREATED, Json(property)))
}

/// # PUT /api/properties/{id}
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyReq {
	pincode: Option<String>,
	address1: Option<String>,
	address2: Option<String>,
	city: Option<String>,
	state: Option<String>,
}

pub async fn put_property(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(property_id): Path<i64>,
	Json(req): Json<UpdatePropertyReq>,
) -> RtResult<(StatusCode, Json<Property>)> {
	policy::check(auth.role, Entity::Property, Op::Update)?;
	let scope = resolve_scope(&auth)?;

	let property = app
		.store_adapter
		.update_property(
			&scope,
			property_id,
			&UpdateProperty {
				pincode: req.pincode.as_deref(),
				address1: req.address1.as_deref(),
				address2: req.address2.as_deref(),
				city: req.city.as_deref(),
				state: req.state.as_deref(),
			},
		)
		.await?;

	Ok((StatusCode::OK, Json(property)))
}

/// # DELETE /api/properties/{id}
pub async fn delete_property(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(property_id): Path<i64>,
) -> RtResult<StatusCode> {
	policy::check(auth.role, Entity::Property, Op::Delete)?;
	let scope = resolve_scope(&auth)?;
	app.store_adapter.delete_property(&scope, property_id).await?;
	Ok(StatusCode::NO_CONTENT)
}

/// # DELETE /api/properties
pub async fn delete_properties(
	State(app): State<App>,
	Auth(auth): Auth,
) -> RtResult<(StatusCode, Json<DeletedRes>)> {
	policy::check(auth.role, Entity::Property, Op::DeleteAll)?;
	let scope = resolve_scope(&auth)?;
	let deleted_count = app.store_adapter.delete_all_properties(&scope).await?;
	info!("Deleted {} properties in scope {:?}", deleted_count, scope.filter());
	Ok((StatusCode::OK, Json(DeletedRes { deleted_count })))
}

// vim: ts=4
