//! Owner self-registration
//!
//! A single transition: validate, check uniqueness, generate the tenant
//! partition, hash the credential, open the trial window, persist and issue
//! a session token. Failure at any step aborts before persistence; the
//! storage-level unique indexes catch concurrent duplicates the pre-check
//! cannot see.

use axum::{Json, extract::State, http::StatusCode};
use rand::RngExt;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::token::AuthClaims;
use crate::prelude::*;
use rentra_types::email_adapter::EmailMessage;
use rentra_types::store_adapter::{CreateOwner, Owner, SubscriptionStatus};

pub const TRIAL_DAYS: i64 = 30;
pub const BCRYPT_COST: u32 = 10;

#[allow(clippy::expect_used)]
static NATIONAL_ID_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\d{12}$").expect("hardcoded regex"));
#[allow(clippy::expect_used)]
static TAX_ID_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("hardcoded regex"));

fn to_base36(mut n: u128) -> String {
	const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
	if n == 0 {
		return "0".into();
	}
	let mut out = Vec::new();
	while n > 0 {
		out.push(DIGITS[(n % 36) as usize]);
		n /= 36;
	}
	out.reverse();
	String::from_utf8(out).unwrap_or_default()
}

/// `tenant_<unix-millis base36>_<8 hex chars of a uuid v4>`
pub fn generate_tenant_id() -> TenantId {
	let millis = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_millis())
		.unwrap_or_default();
	let uuid = uuid::Uuid::new_v4().simple().to_string();
	TenantId(format!("tenant_{}_{}", to_base36(millis), &uuid[..8]).into())
}

pub async fn hash_password(password: &str) -> RtResult<Box<str>> {
	let password = password.to_owned();
	tokio::task::spawn_blocking(move || {
		bcrypt::hash(&password, BCRYPT_COST)
			.map(Box::from)
			.map_err(|_| Error::ValidationError("Unable to hash password".into()))
	})
	.await
	.map_err(|_| Error::DbError)?
}

pub async fn check_password(password: &str, password_hash: &str) -> RtResult<()> {
	let password = password.to_owned();
	let password_hash = password_hash.to_owned();
	tokio::task::spawn_blocking(move || {
		match bcrypt::verify(&password, &password_hash) {
			Ok(true) => Ok(()),
			_ => Err(Error::Unauthorized),
		}
	})
	.await
	.map_err(|_| Error::DbError)?
}

pub fn random_credential() -> Box<str> {
	rand::rng()
		.sample_iter(&rand::distr::Alphanumeric)
		.take(32)
		.map(char::from)
		.collect::<String>()
		.into()
}

/// # POST /api/owner/self-register
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterReq {
	name: String,
	email: String,
	password: String,
	phone: String,
	alternate_phone: Option<String>,
	national_id: String,
	tax_id: Option<String>,
	address: String,
	city: String,
	state: String,
	pincode: String,
	company_name: Option<String>,
	business_type: Option<String>,
	gst_number: Option<String>,
	bank_account_number: Option<String>,
	ifsc_code: Option<String>,
	bank_name: Option<String>,
}

#[skip_serializing_none]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRes {
	message: Box<str>,
	token: Box<str>,
	#[serde(rename = "tenant_id")]
	tenant_id: TenantId,
	user: Owner,
}

fn validate(req: &RegisterReq) -> RtResult<()> {
	let required = [
		("name", &req.name),
		("email", &req.email),
		("password", &req.password),
		("phone", &req.phone),
		("nationalId", &req.national_id),
		("address", &req.address),
		("city", &req.city),
		("state", &req.state),
		("pincode", &req.pincode),
	];
	for (field, value) in required {
		if value.trim().is_empty() {
			return Err(Error::ValidationError(format!("Missing required field: {}", field)));
		}
	}
	if !req.email.contains('@') {
		return Err(Error::ValidationError("Invalid email address".into()));
	}
	if !NATIONAL_ID_RE.is_match(&req.national_id) {
		return Err(Error::ValidationError("National id must be a 12 digit number".into()));
	}
	if let Some(ref tax_id) = req.tax_id {
		if !TAX_ID_RE.is_match(tax_id) {
			return Err(Error::ValidationError("Invalid tax id format".into()));
		}
	}
	Ok(())
}

/// Shared by self-registration and platform-administered owner creation.
/// Validates, checks uniqueness, generates the tenant partition, hashes the
/// credential and opens the trial window.
pub(crate) async fn create_owner_account(app: &App, req: &RegisterReq) -> RtResult<Owner> {
	validate(req)?;
	let email = req.email.trim().to_lowercase();

	if app.store_adapter.owner_exists(&email, &req.national_id).await? {
		return Err(Error::Conflict(
			"Owner with this email or national id already exists".into(),
		));
	}

	let tenant_id = generate_tenant_id();
	let password_hash = hash_password(&req.password).await?;

	let now = chrono::Utc::now();
	let trial_end = now + chrono::Duration::days(TRIAL_DAYS);

	// a concurrent duplicate registration fails here on the unique indexes
	let owner = app
		.store_adapter
		.create_owner(&CreateOwner {
			tenant_id: tenant_id.as_str(),
			name: req.name.trim(),
			email: &email,
			password_hash: &password_hash,
			phone: &req.phone,
			alternate_phone: req.alternate_phone.as_deref(),
			national_id: &req.national_id,
			tax_id: req.tax_id.as_deref(),
			address: &req.address,
			city: &req.city,
			state: &req.state,
			pincode: &req.pincode,
			company_name: req.company_name.as_deref(),
			business_type: req.business_type.as_deref().unwrap_or("Individual"),
			gst_number: req.gst_number.as_deref(),
			bank_account_number: req.bank_account_number.as_deref(),
			ifsc_code: req.ifsc_code.as_deref(),
			bank_name: req.bank_name.as_deref(),
			trial_start_date: Timestamp(now.timestamp()),
			trial_end_date: Timestamp(trial_end.timestamp()),
			subscription_status: SubscriptionStatus::Trial,
		})
		.await?;

	info!("Registered owner {} under {}", owner.email, owner.tenant_id);
	Ok(owner)
}

pub async fn post_self_register(
	State(app): State<App>,
	Json(req): Json<RegisterReq>,
) -> RtResult<(StatusCode, Json<RegisterRes>)> {
	let owner = create_owner_account(&app, &req).await?;

	let token = app.token_service.issue(&AuthClaims {
		user_id: owner.owner_id,
		email: owner.email.clone(),
		name: owner.name.clone(),
		role: Role::Owner,
		tenant_id: Some(owner.tenant_id.clone()),
	})?;

	// best effort, registration already succeeded
	if let Some(ref email_adapter) = app.email_adapter {
		let trial_end = chrono::DateTime::from_timestamp(owner.trial_end_date.0, 0)
			.map(|d| d.format("%Y-%m-%d").to_string())
			.unwrap_or_default();
		let message = EmailMessage {
			to: owner.email.clone(),
			subject: "Welcome to Rentra".into(),
			text_body: format!(
				"Hi {},\n\nYour account is ready. Your {}-day free trial runs until {}.",
				owner.name, TRIAL_DAYS, trial_end,
			)
			.into(),
		};
		if let Err(err) = email_adapter.send(message).await {
			warn!("Failed to send welcome email to {}: {}", owner.email, err);
		}
	}

	Ok((
		StatusCode::CREATED,
		Json(RegisterRes {
			message: "Owner registered successfully".into(),
			token,
			tenant_id: owner.tenant_id.clone(),
			user: owner,
		}),
	))
}


// vim: ts=4
