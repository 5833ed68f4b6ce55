//! Rent transaction endpoints
//!
//! Owners see their tenant partition. A ClientMaster reads through their
//! email-linked identity set instead: every client record sharing the
//! caller's email, across tenants, because the same renter may rent from
//! several owners.

use axum::{
	Json,
	extract::{Path, State},
	http::StatusCode,
};
use serde::Deserialize;

use crate::core::Auth;
use crate::core::policy::{self, Entity, Op};
use crate::core::scope::{resolve_scope, resolve_write_tenant};
use crate::core::token::AuthClaims;
use crate::prelude::*;
use crate::types::DeletedRes;
use rentra_types::store_adapter::{CreateTransaction, RentTransaction};

async fn identity_set(app: &App, claims: &AuthClaims) -> RtResult<Vec<i64>> {
	app.store_adapter.list_client_ids_by_email(&claims.email).await
}

/// # GET /api/transactions
pub async fn get_transactions(
	State(app): State<App>,
	Auth(auth): Auth,
) -> RtResult<(StatusCode, Json<Vec<RentTransaction>>)> {
	policy::check(auth.role, Entity::RentTransaction, Op::Read)?;

	let transactions = match auth.role {
		Role::ClientMaster => {
			let client_ids = identity_set(&app, &auth).await?;
			app.store_adapter.list_transactions_for_clients(&client_ids).await?
		}
		_ => {
			let scope = resolve_scope(&auth)?;
			app.store_adapter.list_transactions(&scope).await?
		}
	};

	Ok((StatusCode::OK, Json(transactions)))
}

/// # GET /api/transactions/{id}
pub async fn get_transaction(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(transaction_id): Path<i64>,
) -> RtResult<(StatusCode, Json<RentTransaction>)> {
	policy::check(auth.role, Entity::RentTransaction, Op::Read)?;

	let transaction = match auth.role {
		Role::ClientMaster => {
			let transaction = app
				.store_adapter
				.read_transaction(&TenantScope::Unrestricted, transaction_id)
				.await?;
			// record-level check against the identity set; a record outside
			// it reads as absent, not forbidden, so existence is never
			// revealed across the boundary
			let client_ids = identity_set(&app, &auth).await?;
			if !client_ids.contains(&transaction.client_id) {
				return Err(Error::NotFound);
			}
			transaction
		}
		_ => {
			let scope = resolve_scope(&auth)?;
			app.store_adapter.read_transaction(&scope, transaction_id).await?
		}
	};

	Ok((StatusCode::OK, Json(transaction)))
}

/// # POST /api/transactions
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionReq {
	rent_from: String,
	rent_to: String,
	payment_threshold: String,
	payment_mode: String,
	client_id: i64,
	property_id: i64,
	agreement_id: i64,
}

pub async fn post_transaction(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(req): Json<CreateTransactionReq>,
) -> RtResult<(StatusCode, Json<RentTransaction>)> {
	policy::check(auth.role, Entity::RentTransaction, Op::Create)?;
	let tenant_id = resolve_write_tenant(&auth, None)?;
	let scope = TenantScope::Scoped(tenant_id.clone());

	// every referenced record must share the caller's tenant
	let client = app.store_adapter.read_client(&scope, req.client_id).await?;
	let property = app.store_adapter.read_property(&scope, req.property_id).await?;
	let agreement = app.store_adapter.read_agreement(&scope, req.agreement_id).await?;
	let owner = app.store_adapter.read_owner_by_tenant(tenant_id.as_str()).await?;

	let transaction = app
		.store_adapter
		.create_transaction(&CreateTransaction {
			tenant_id: tenant_id.as_str(),
			rent_from: &req.rent_from,
			rent_to: &req.rent_to,
			payment_threshold: &req.payment_threshold,
			payment_mode: &req.payment_mode,
			client_id: client.client_id,
			property_id: property.property_id,
			agreement_id: agreement.agreement_id,
			owner_id: owner.owner_id,
		})
		.await?;

	Ok((StatusCode::CREATED, Json(transaction)))
}

/// # DELETE /api/transactions/{id}
pub async fn delete_transaction(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(transaction_id): Path<i64>,
) -> RtResult<StatusCode> {
	policy::check(auth.role, Entity::RentTransaction, Op::Delete)?;
	let scope = resolve_scope(&auth)?;
	app.store_adapter.delete_transaction(&scope, transaction_id).await?;
	Ok(StatusCode::NO_CONTENT)
}

/// # DELETE /api/transactions
pub async fn delete_transactions(
	State(app): State<App>,
	Auth(auth): Auth,
) -> RtResult<(StatusCode, Json<DeletedRes>)> {
	policy::check(auth.role, Entity::RentTransaction, Op::DeleteAll)?;
	let scope = resolve_scope(&auth)?;
	let deleted_count = app.store_adapter.delete_all_transactions(&scope).await?;
	info!("Deleted {} transactions in scope {:?}", deleted_count, scope.filter());
	Ok((StatusCode::OK, Json(DeletedRes { deleted_count })))
}

// vim: ts=4
