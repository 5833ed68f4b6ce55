//! Rent agreement endpoints (Owner-only)
//!
//! Financial terms arrive and leave as exact decimals; nothing here touches
//! binary floating point.

use axum::{
	Json,
	extract::{Path, State},
	http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::Auth;
use crate::core::policy::{self, Entity, Op};
use crate::core::scope::{resolve_scope, resolve_write_tenant};
use crate::prelude::*;
use crate::types::DeletedRes;
use rentra_types::store_adapter::{CreateAgreement, RentAgreement, UpdateAgreement};

/// # GET /api/agreements
pub async fn get_agreements(
	State(app): State<App>,
	Auth(auth): Auth,
) -> RtResult<(StatusCode, Json<Vec<RentAgreement>>)> {
	policy::check(auth.role, Entity::RentAgreement, Op::Read)?;
	let scope = resolve_scope(&auth)?;
	let agreements = app.store_adapter.list_agreements(&scope).await?;
	Ok((StatusCode::OK, Json(agreements)))
}

/// # GET /api/agreements/{id}
pub async fn get_agreement(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(agreement_id): Path<i64>,
) -> RtResult<(StatusCode, Json<RentAgreement>)> {
	policy::check(auth.role, Entity::RentAgreement, Op::Read)?;
	let scope = resolve_scope(&auth)?;
	let agreement = app.store_adapter.read_agreement(&scope, agreement_id).await?;
	Ok((StatusCode::OK, Json(agreement)))
}

/// # POST /api/agreements
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgreementReq {
	electricity_meter_number: String,
	monthly_rent: Decimal,
	security_deposit_amount: Decimal,
	increment_percentage: Decimal,
	increment_schedule: Decimal,
	payment_date: Option<String>,
	payment_mode: String,
	client_id: i64,
	property_id: i64,
}

pub async fn post_agreement(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(req): Json<CreateAgreementReq>,
) -> RtResult<(StatusCode, Json<RentAgreement>)> {
	policy::check(auth.role, Entity::RentAgreement, Op::Create)?;
	let tenant_id = resolve_write_tenant(&auth, None)?;
	let scope = TenantScope::Scoped(tenant_id.clone());

	if req.monthly_rent.is_sign_negative() || req.security_deposit_amount.is_sign_negative() {
		return Err(Error::ValidationError("Amounts must not be negative".into()));
	}

	// referenced records must live in the caller's partition
	let client = app.store_adapter.read_client(&scope, req.client_id).await?;
	let property = app.store_adapter.read_property(&scope, req.property_id).await?;
	let owner = app.store_adapter.read_owner_by_tenant(tenant_id.as_str()).await?;

	let agreement = app
		.store_adapter
		.create_agreement(&CreateAgreement {
			tenant_id: tenant_id.as_str(),
			electricity_meter_number: &req.electricity_meter_number,
			monthly_rent: req.monthly_rent,
			security_deposit_amount: req.security_deposit_amount,
			increment_percentage: req.increment_percentage,
			increment_schedule: req.increment_schedule,
			payment_date: req.payment_date.as_deref(),
			payment_mode: &req.payment_mode,
			client_id: client.client_id,
			property_id: property.property_id,
			owner_id: owner.owner_id,
		})
		.await?;

	Ok((StatusCode::CREATED, Json(agreement)))
}

/// # PUT /api/agreements/{id}
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAgreementReq {
	electricity_meter_number: Option<String>,
	monthly_rent: Option<Decimal>,
	security_deposit_amount: Option<Decimal>,
	increment_percentage: Option<Decimal>,
	increment_schedule: Option<Decimal>,
	payment_date: Option<String>,
	payment_mode: Option<String>,
}

pub async fn put_agreement(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(agreement_id): Path<i64>,
	Json(req): Json<UpdateAgreementReq>,
) -> RtResult<(StatusCode, Json<RentAgreement>)> {
	policy::check(auth.role, Entity::RentAgreement, Op::Update)?;
	let scope = resolve_scope(&auth)?;

	if req.monthly_rent.is_some_and(|d| d.is_sign_negative()) {
		return Err(Error::ValidationError("Amounts must not be negative".into()));
	}

	let agreement = app
		.store_adapter
		.update_agreement(
			&scope,
			agreement_id,
			&UpdateAgreement {
				electricity_meter_number: req.electricity_meter_number.as_deref(),
				monthly_rent: req.monthly_rent,
				security_deposit_amount: req.security_deposit_amount,
				increment_percentage: req.increment_percentage,
				increment_schedule: req.increment_schedule,
				payment_date: req.payment_date.as_deref(),
				payment_mode: req.payment_mode.as_deref(),
			},
		)
		.await?;

	Ok((StatusCode::OK, Json(agreement)))
}

/// # DELETE /api/agreements/{id}
pub async fn delete_agreement(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(agreement_id): Path<i64>,
) -> RtResult<StatusCode> {
	policy::check(auth.role, Entity::RentAgreement, Op::Delete)?;
	let scope = resolve_scope(&auth)?;
	app.store_adapter.delete_agreement(&scope, agreement_id).await?;
	Ok(StatusCode::NO_CONTENT)
}

/// # DELETE /api/agreements
pub async fn delete_agreements(
	State(app): State<App>,
	Auth(auth): Auth,
) -> RtResult<(StatusCode, Json<DeletedRes>)> {
	policy::check(auth.role, Entity::RentAgreement, Op::DeleteAll)?;
	let scope = resolve_scope(&auth)?;
	let deleted_count = app.store_adapter.delete_all_agreements(&scope).await?;
	info!("Deleted {} agreements in scope {:?}", deleted_count, scope.filter());
	Ok((StatusCode::OK, Json(DeletedRes { deleted_count })))
}

// vim: ts=4
