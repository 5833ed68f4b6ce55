use axum::{
	Json,
	extract::{Path, State},
	http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::sync::Arc;

use crate::auth::register::{check_password, hash_password, random_credential};
use crate::core::token::AuthClaims;
use crate::prelude::*;
use crate::types::Message;
use rentra_types::email_adapter::{EmailAdapter, EmailMessage};
use rentra_types::otp::{OtpOutcome, generate_otp};
use rentra_types::store_adapter::{Owner, SubscriptionStatus};

/// # Login response
#[skip_serializing_none]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Login<T> {
	message: Box<str>,
	token: Box<str>,
	#[serde(rename = "tenant_id")]
	tenant_id: Option<TenantId>,
	days_remaining_in_trial: Option<i64>,
	user: T,
}

fn email_adapter(app: &App) -> RtResult<&Arc<dyn EmailAdapter>> {
	app.email_adapter
		.as_ref()
		.ok_or(Error::ServiceUnavailable("Email delivery is not configured".into()))
}

/// Trial gate: expired trial with valid credentials is a distinct failure
/// from bad credentials. Returns the days remaining for owners still in
/// trial.
fn check_trial(owner: &Owner) -> RtResult<Option<i64>> {
	match owner.subscription_status {
		SubscriptionStatus::Active => Ok(None),
		SubscriptionStatus::Expired => Err(Error::TrialExpired),
		SubscriptionStatus::Trial => {
			let now = Timestamp::now();
			if now > owner.trial_end_date {
				return Err(Error::TrialExpired);
			}
			Ok(Some((owner.trial_end_date.0 - now.0).div_euclid(24 * 3600)))
		}
	}
}

async fn owner_login(app: &App, owner: Owner, password: &str) -> RtResult<(StatusCode, Json<Login<Owner>>)> {
	check_password(password, &owner.password_hash).await?;
	let days_remaining = check_trial(&owner)?;

	let token = app.token_service.issue(&AuthClaims {
		user_id: owner.owner_id,
		email: owner.email.clone(),
		name: owner.name.clone(),
		role: Role::Owner,
		tenant_id: Some(owner.tenant_id.clone()),
	})?;

	Ok((
		StatusCode::OK,
		Json(Login {
			message: "Login successful".into(),
			token,
			tenant_id: Some(owner.tenant_id.clone()),
			days_remaining_in_trial: days_remaining,
			user: owner,
		}),
	))
}

/// # POST /api/login
#[derive(Deserialize)]
pub struct LoginReq {
	email: String,
	password: String,
}

pub async fn post_login(
	State(app): State<App>,
	Json(login): Json<LoginReq>,
) -> RtResult<axum::response::Response> {
	use axum::response::IntoResponse;

	let email = login.email.trim().to_lowercase();

	match app.store_adapter.read_owner_by_email(&email).await {
		Ok(owner) => return Ok(owner_login(&app, owner, &login.password).await?.into_response()),
		Err(Error::NotFound) => {}
		Err(err) => return Err(err),
	}

	let client = app
		.store_adapter
		.read_client_by_email(&TenantScope::Unrestricted, &email)
		.await?
		.ok_or(Error::Unauthorized)?;
	let password_hash = client.password_hash.clone().ok_or(Error::Unauthorized)?;
	check_password(&login.password, &password_hash).await?;

	let token = app.token_service.issue(&AuthClaims {
		user_id: client.client_id,
		email: email.into(),
		name: client.name.clone(),
		role: Role::ClientMaster,
		tenant_id: Some(client.tenant_id.clone()),
	})?;

	Ok((
		StatusCode::OK,
		Json(Login {
			message: "Login successful".into(),
			token,
			tenant_id: Some(client.tenant_id.clone()),
			days_remaining_in_trial: None,
			user: client,
		}),
	)
		.into_response())
}

/// # POST /api/owner/login
pub async fn post_owner_login(
	State(app): State<App>,
	Json(login): Json<LoginReq>,
) -> RtResult<(StatusCode, Json<Login<Owner>>)> {
	let email = login.email.trim().to_lowercase();
	let owner = match app.store_adapter.read_owner_by_email(&email).await {
		Ok(owner) => owner,
		// do not reveal whether the account exists
		Err(Error::NotFound) => return Err(Error::Unauthorized),
		Err(err) => return Err(err),
	};

	owner_login(&app, owner, &login.password).await
}

/// # POST /api/owner/send-otp
#[derive(Deserialize)]
pub struct SendOtpReq {
	email: String,
}

pub async fn post_send_otp(
	State(app): State<App>,
	Json(req): Json<SendOtpReq>,
) -> RtResult<(StatusCode, Json<Message>)> {
	let email = req.email.trim().to_lowercase();
	if !email.contains('@') {
		return Err(Error::ValidationError("Invalid email address".into()));
	}

	let code = generate_otp();
	app.otp_store.put(&email, &code);

	email_adapter(&app)?
		.send(EmailMessage {
			to: email.clone().into(),
			subject: "Your Rentra verification code".into(),
			text_body: format!("Your verification code is {}. It expires in 5 minutes.", code)
				.into(),
		})
		.await
		.map_err(|err| {
			warn!("Failed to send OTP to {}: {}", email, err);
			Error::ServiceUnavailable("Unable to send verification email".into())
		})?;

	Ok((StatusCode::OK, Json(Message::new("OTP sent successfully"))))
}

/// # POST /api/owner/verify-otp
#[derive(Deserialize)]
pub struct VerifyOtpReq {
	email: String,
	otp: String,
}

pub async fn post_verify_otp(
	State(app): State<App>,
	Json(req): Json<VerifyOtpReq>,
) -> RtResult<(StatusCode, Json<Message>)> {
	let email = req.email.trim().to_lowercase();

	match app.otp_store.verify(&email, req.otp.trim()) {
		OtpOutcome::Verified => {
			Ok((StatusCode::OK, Json(Message::new(OtpOutcome::Verified.message()))))
		}
		outcome => Err(Error::ValidationError(outcome.message().into())),
	}
}

/// # POST /api/forgot-password
#[derive(Deserialize)]
pub struct ForgotPasswordReq {
	email: String,
}

enum ResetAccount {
	Owner(Owner),
	Client { client_id: i64, email: Box<str>, password_hash: Box<str> },
}

async fn find_reset_account(app: &App, email: &str) -> RtResult<ResetAccount> {
	match app.store_adapter.read_owner_by_email(email).await {
		Ok(owner) => return Ok(ResetAccount::Owner(owner)),
		Err(Error::NotFound) => {}
		Err(err) => return Err(err),
	}

	let client = app
		.store_adapter
		.read_client_by_email(&TenantScope::Unrestricted, email)
		.await?
		.ok_or(Error::NotFound)?;
	let password_hash = client.password_hash.ok_or(Error::NotFound)?;
	Ok(ResetAccount::Client { client_id: client.client_id, email: email.into(), password_hash })
}

pub async fn post_forgot_password(
	State(app): State<App>,
	Json(req): Json<ForgotPasswordReq>,
) -> RtResult<(StatusCode, Json<Message>)> {
	let email = req.email.trim().to_lowercase();

	let (user_id, to, password_hash) = match find_reset_account(&app, &email).await? {
		ResetAccount::Owner(owner) => {
			(owner.owner_id, owner.email.clone(), owner.password_hash.clone())
		}
		ResetAccount::Client { client_id, email, password_hash } => {
			(client_id, email, password_hash)
		}
	};

	let token = app.token_service.issue_reset(user_id, &to, &password_hash)?;
	let link = format!("{}/reset-password/{}/{}", app.opts.reset_link_base, user_id, token);

	email_adapter(&app)?
		.send(EmailMessage {
			to,
			subject: "Rentra password reset".into(),
			text_body: format!(
				"A password reset was requested for your account.\n\n{}\n\nThe link expires in 5 minutes.",
				link
			)
			.into(),
		})
		.await
		.map_err(|err| {
			warn!("Failed to send reset email: {}", err);
			Error::ServiceUnavailable("Unable to send reset email".into())
		})?;

	Ok((StatusCode::OK, Json(Message::new("Password reset link sent"))))
}

/// # POST /api/reset-password/{id}/{token}
#[derive(Deserialize)]
pub struct ResetPasswordReq {
	password: String,
}

pub async fn post_reset_password(
	State(app): State<App>,
	Path((user_id, token)): Path<(i64, String)>,
	Json(req): Json<ResetPasswordReq>,
) -> RtResult<(StatusCode, Json<Message>)> {
	if req.password.len() < 8 {
		return Err(Error::ValidationError("Password must be at least 8 characters".into()));
	}

	// owners and clients draw ids from independent sequences, so one id can
	// name an account of each kind; the token only verifies against the hash
	// it was signed with, and that signature picks the account
	match app.store_adapter.read_owner(user_id).await {
		Ok(owner) => {
			if app.token_service.verify_reset(&token, &owner.password_hash).is_ok() {
				let password_hash = hash_password(&req.password).await?;
				app.store_adapter.update_owner_password(owner.owner_id, &password_hash).await?;
				info!("Password reset for owner {}", owner.owner_id);
				return Ok((StatusCode::OK, Json(Message::new("Password reset successful"))));
			}
		}
		Err(Error::NotFound) => {}
		Err(err) => return Err(err),
	}

	let client = match app.store_adapter.read_client(&TenantScope::Unrestricted, user_id).await {
		Ok(client) => client,
		Err(Error::NotFound) => return Err(Error::Unauthorized),
		Err(err) => return Err(err),
	};
	let password_hash = client.password_hash.ok_or(Error::Unauthorized)?;
	app.token_service.verify_reset(&token, &password_hash)?;
	let new_hash = hash_password(&req.password).await?;
	app.store_adapter.update_client_password(client.client_id, &new_hash).await?;
	info!("Password reset for client {}", client.client_id);

	Ok((StatusCode::OK, Json(Message::new("Password reset successful"))))
}

/// # POST /api/auth/sso-exchange
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsoExchangeReq {
	access_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SsoExchangeRes {
	message: Box<str>,
	token: Box<str>,
	email: Box<str>,
	name: Box<str>,
	role: Role,
}

pub async fn post_sso_exchange(
	State(app): State<App>,
	Json(req): Json<SsoExchangeReq>,
) -> RtResult<(StatusCode, Json<SsoExchangeRes>)> {
	let idp = app
		.idp_adapter
		.as_ref()
		.ok_or(Error::ServiceUnavailable("Identity provider is not configured".into()))?;

	let profile = idp.verify(&req.access_token).await?;
	let email = profile.email.trim().to_lowercase();

	let user = match app.store_adapter.read_platform_user_by_email(&email).await {
		Ok(user) => user,
		Err(Error::NotFound) => {
			// first sight: auto-provision, kept auditable in the log
			let credential = hash_password(&random_credential()).await?;
			let user = app.store_adapter.create_platform_user(&email, &credential).await?;
			warn!("Provisioned SuperAdmin platform user {} via SSO exchange", email);
			user
		}
		Err(err) => return Err(err),
	};

	let token = app.token_service.issue(&AuthClaims {
		user_id: user.user_id,
		email: user.email.clone(),
		name: profile.display_name.clone(),
		role: Role::SuperAdmin,
		tenant_id: None,
	})?;

	Ok((
		StatusCode::OK,
		Json(SsoExchangeRes {
			message: "Login successful".into(),
			token,
			email: user.email,
			name: profile.display_name,
			role: Role::SuperAdmin,
		}),
	))
}

/// # GET /api/health
pub async fn get_health() -> (StatusCode, Json<Message>) {
	(StatusCode::OK, Json(Message::new("ok")))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn owner(status: SubscriptionStatus, trial_end: Timestamp) -> Owner {
		Owner {
			owner_id: 1,
			tenant_id: TenantId::from("tenant_m1abc_0f3a9b2c"),
			name: "Asha".into(),
			email: "asha@example.com".into(),
			password_hash: "$2b$10$hash".into(),
			phone: "9876543210".into(),
			alternate_phone: None,
			national_id: "123456789012".into(),
			tax_id: None,
			address: "12 Lake Rd".into(),
			city: "Pune".into(),
			state: "MH".into(),
			pincode: "411001".into(),
			company_name: None,
			business_type: "Individual".into(),
			gst_number: None,
			bank_account_number: None,
			ifsc_code: None,
			bank_name: None,
			role: Role::Owner,
			trial_start_date: Timestamp::from_now(-24 * 3600),
			trial_end_date: trial_end,
			is_trial_active: true,
			subscription_status: status,
			created_at: Timestamp::now(),
		}
	}

	#[test]
	fn test_trial_gate_active_subscription() {
		let owner = owner(SubscriptionStatus::Active, Timestamp::from_now(-1));
		assert_eq!(check_trial(&owner).unwrap(), None);
	}

	#[test]
	fn test_trial_gate_running_trial_reports_days() {
		let owner = owner(SubscriptionStatus::Trial, Timestamp::from_now(10 * 24 * 3600 + 60));
		assert_eq!(check_trial(&owner).unwrap(), Some(10));
	}

	#[test]
	fn test_trial_gate_expired_trial() {
		let lapsed = owner(SubscriptionStatus::Trial, Timestamp::from_now(-60));
		assert!(matches!(check_trial(&lapsed), Err(Error::TrialExpired)));

		let cancelled = owner(SubscriptionStatus::Expired, Timestamp::from_now(10 * 24 * 3600));
		assert!(matches!(check_trial(&cancelled), Err(Error::TrialExpired)));
	}
}

// vim: ts=4
