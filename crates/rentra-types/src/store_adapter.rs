//! Adapter that stores and manages all tenant-partitioned entity data.
//!
//! Every read/write on a tenant-partitioned entity takes a [`TenantScope`]:
//! `Scoped` intersects the operation's filter with the caller's tenant id,
//! `Unrestricted` (SuperAdmin) applies no tenant filter. The adapter is the
//! last line of defense — even a guessable record id never crosses a tenant
//! boundary when the scope is `Scoped`.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt::Debug;

use crate::prelude::*;

// Subscription status //
//*********************//

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
	Trial,
	Active,
	Expired,
}

impl std::fmt::Display for SubscriptionStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			SubscriptionStatus::Trial => write!(f, "trial"),
			SubscriptionStatus::Active => write!(f, "active"),
			SubscriptionStatus::Expired => write!(f, "expired"),
		}
	}
}

impl std::str::FromStr for SubscriptionStatus {
	type Err = Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"trial" => Ok(SubscriptionStatus::Trial),
			"active" => Ok(SubscriptionStatus::Active),
			"expired" => Ok(SubscriptionStatus::Expired),
			_ => Err(Error::ValidationError(format!("invalid subscription status: {}", s))),
		}
	}
}

// Owner //
//*******//

/// Tenant-owning identity. `tenant_id`, `email` and `national_id` are
/// unique at the storage level; `tenant_id` is immutable after creation.
#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
	pub owner_id: i64,
	#[serde(rename = "tenant_id")]
	pub tenant_id: TenantId,
	pub name: Box<str>,
	pub email: Box<str>,
	#[serde(skip_serializing)]
	pub password_hash: Box<str>,
	pub phone: Box<str>,
	pub alternate_phone: Option<Box<str>>,
	pub national_id: Box<str>,
	pub tax_id: Option<Box<str>>,
	pub address: Box<str>,
	pub city: Box<str>,
	pub state: Box<str>,
	pub pincode: Box<str>,
	pub company_name: Option<Box<str>>,
	pub business_type: Box<str>,
	pub gst_number: Option<Box<str>>,
	pub bank_account_number: Option<Box<str>>,
	pub ifsc_code: Option<Box<str>>,
	pub bank_name: Option<Box<str>>,
	pub role: Role,
	pub trial_start_date: Timestamp,
	pub trial_end_date: Timestamp,
	pub is_trial_active: bool,
	pub subscription_status: SubscriptionStatus,
	pub created_at: Timestamp,
}

/// Data needed to persist a new Owner. The self-registration workflow
/// computes the tenant id, password hash and trial window before this
/// struct ever reaches the adapter.
#[derive(Debug)]
pub struct CreateOwner<'a> {
	pub tenant_id: &'a str,
	pub name: &'a str,
	pub email: &'a str,
	pub password_hash: &'a str,
	pub phone: &'a str,
	pub alternate_phone: Option<&'a str>,
	pub national_id: &'a str,
	pub tax_id: Option<&'a str>,
	pub address: &'a str,
	pub city: &'a str,
	pub state: &'a str,
	pub pincode: &'a str,
	pub company_name: Option<&'a str>,
	pub business_type: &'a str,
	pub gst_number: Option<&'a str>,
	pub bank_account_number: Option<&'a str>,
	pub ifsc_code: Option<&'a str>,
	pub bank_name: Option<&'a str>,
	pub trial_start_date: Timestamp,
	pub trial_end_date: Timestamp,
	pub subscription_status: SubscriptionStatus,
}

/// Partial update; only supplied fields are applied
#[derive(Debug, Default)]
pub struct UpdateOwner<'a> {
	pub name: Option<&'a str>,
	pub email: Option<&'a str>,
	pub phone: Option<&'a str>,
	pub password_hash: Option<&'a str>,
	pub subscription_status: Option<SubscriptionStatus>,
}

// Platform user //
//***************//

/// Platform-level identity (SuperAdmin), no tenant partition
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformUser {
	pub user_id: i64,
	pub email: Box<str>,
	#[serde(skip_serializing)]
	pub password_hash: Box<str>,
	pub role: Role,
	pub created_at: Timestamp,
}

// Client //
//********//

/// Tenant (renter) record. `(tenant_id, email)` is unique — the same
/// email may recur across tenants, which is how a renter can be
/// represented under multiple owners.
#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
	pub client_id: i64,
	#[serde(rename = "tenant_id")]
	pub tenant_id: TenantId,
	pub name: Box<str>,
	pub gender: Option<Box<str>>,
	pub father_name: Option<Box<str>>,
	pub address1: Option<Box<str>>,
	pub address2: Option<Box<str>>,
	pub mobile_number: Option<Box<str>>,
	pub email: Option<Box<str>>,
	#[serde(skip_serializing)]
	pub password_hash: Option<Box<str>>,
	pub role: Role,
	pub owner_id: i64,
	pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateClient<'a> {
	pub tenant_id: &'a str,
	pub name: &'a str,
	pub gender: Option<&'a str>,
	pub father_name: Option<&'a str>,
	pub address1: Option<&'a str>,
	pub address2: Option<&'a str>,
	pub mobile_number: Option<&'a str>,
	pub email: Option<&'a str>,
	pub password_hash: Option<&'a str>,
	pub owner_id: i64,
}

#[derive(Debug, Default)]
pub struct UpdateClient<'a> {
	pub name: Option<&'a str>,
	pub gender: Option<&'a str>,
	pub father_name: Option<&'a str>,
	pub address1: Option<&'a str>,
	pub address2: Option<&'a str>,
	pub mobile_number: Option<&'a str>,
	pub email: Option<&'a str>,
	pub password_hash: Option<&'a str>,
}

// Property //
//**********//

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
	pub property_id: i64,
	#[serde(rename = "tenant_id")]
	pub tenant_id: TenantId,
	pub pincode: Box<str>,
	pub address1: Box<str>,
	pub address2: Box<str>,
	pub city: Box<str>,
	pub state: Box<str>,
	pub owner_id: i64,
	pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateProperty<'a> {
	pub tenant_id: &'a str,
	pub pincode: &'a str,
	pub address1: &'a str,
	pub address2: &'a str,
	pub city: &'a str,
	pub state: &'a str,
	pub owner_id: i64,
}

#[derive(Debug, Default)]
pub struct UpdateProperty<'a> {
	pub pincode: Option<&'a str>,
	pub address1: Option<&'a str>,
	pub address2: Option<&'a str>,
	pub city: Option<&'a str>,
	pub state: Option<&'a str>,
}

// Rent agreement //
//****************//

/// Financial terms are exact decimals; they are persisted as text and
/// must never pass through binary floating point.
#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentAgreement {
	pub agreement_id: i64,
	#[serde(rename = "tenant_id")]
	pub tenant_id: TenantId,
	pub electricity_meter_number: Box<str>,
	pub monthly_rent: Decimal,
	pub security_deposit_amount: Decimal,
	pub increment_percentage: Decimal,
	pub increment_schedule: Decimal,
	pub payment_date: Option<Box<str>>,
	pub payment_mode: Box<str>,
	pub client_id: i64,
	pub property_id: i64,
	pub owner_id: i64,
	pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateAgreement<'a> {
	pub tenant_id: &'a str,
	pub electricity_meter_number: &'a str,
	pub monthly_rent: Decimal,
	pub security_deposit_amount: Decimal,
	pub increment_percentage: Decimal,
	pub increment_schedule: Decimal,
	pub payment_date: Option<&'a str>,
	pub payment_mode: &'a str,
	pub client_id: i64,
	pub property_id: i64,
	pub owner_id: i64,
}

#[derive(Debug, Default)]
pub struct UpdateAgreement<'a> {
	pub electricity_meter_number: Option<&'a str>,
	pub monthly_rent: Option<Decimal>,
	pub security_deposit_amount: Option<Decimal>,
	pub increment_percentage: Option<Decimal>,
	pub increment_schedule: Option<Decimal>,
	pub payment_date: Option<&'a str>,
	pub payment_mode: Option<&'a str>,
}

// Rent transaction //
//******************//

/// Rent-payment record. Carries its own `tenant_id` copy for filter
/// performance; it must equal the referenced owner's tenant at creation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentTransaction {
	pub transaction_id: i64,
	#[serde(rename = "tenant_id")]
	pub tenant_id: TenantId,
	pub rent_from: Box<str>,
	pub rent_to: Box<str>,
	pub payment_threshold: Box<str>,
	pub payment_mode: Box<str>,
	pub client_id: i64,
	pub property_id: i64,
	pub agreement_id: i64,
	pub owner_id: i64,
	pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateTransaction<'a> {
	pub tenant_id: &'a str,
	pub rent_from: &'a str,
	pub rent_to: &'a str,
	pub payment_threshold: &'a str,
	pub payment_mode: &'a str,
	pub client_id: i64,
	pub property_id: i64,
	pub agreement_id: i64,
	pub owner_id: i64,
}

// Adapter trait //
//***************//

/// A Rentra store adapter.
///
/// Implementations own the persistence engine and are required to enforce
/// the uniqueness constraints (owner email, owner national id, owner
/// tenant id, client `(tenant_id, email)`) at the storage layer — the
/// application-level pre-checks alone do not close the concurrent
/// registration race.
#[async_trait]
pub trait StoreAdapter: Debug + Send + Sync {
	// # Owners
	async fn create_owner(&self, data: &CreateOwner<'_>) -> RtResult<Owner>;
	async fn read_owner(&self, owner_id: i64) -> RtResult<Owner>;
	async fn read_owner_by_email(&self, email: &str) -> RtResult<Owner>;
	async fn read_owner_by_tenant(&self, tenant_id: &str) -> RtResult<Owner>;
	/// Existence check for email OR national id across all owners
	async fn owner_exists(&self, email: &str, national_id: &str) -> RtResult<bool>;
	async fn list_owners(&self) -> RtResult<Vec<Owner>>;
	async fn update_owner(&self, owner_id: i64, data: &UpdateOwner<'_>) -> RtResult<Owner>;
	async fn update_owner_password(&self, owner_id: i64, password_hash: &str) -> RtResult<()>;
	async fn delete_owner(&self, owner_id: i64) -> RtResult<()>;
	async fn delete_all_owners(&self) -> RtResult<u64>;

	// # Platform users
	async fn read_platform_user_by_email(&self, email: &str) -> RtResult<PlatformUser>;
	async fn create_platform_user(&self, email: &str, password_hash: &str)
		-> RtResult<PlatformUser>;

	// # Clients
	async fn create_client(&self, data: &CreateClient<'_>) -> RtResult<Client>;
	async fn read_client(&self, scope: &TenantScope, client_id: i64) -> RtResult<Client>;
	async fn read_client_by_email(&self, scope: &TenantScope, email: &str)
		-> RtResult<Option<Client>>;
	async fn list_clients(&self, scope: &TenantScope) -> RtResult<Vec<Client>>;
	/// All client ids sharing an email, across tenants (identity linkage)
	async fn list_client_ids_by_email(&self, email: &str) -> RtResult<Vec<i64>>;
	async fn update_client(
		&self,
		scope: &TenantScope,
		client_id: i64,
		data: &UpdateClient<'_>,
	) -> RtResult<Client>;
	async fn update_client_password(&self, client_id: i64, password_hash: &str) -> RtResult<()>;
	async fn delete_client(&self, scope: &TenantScope, client_id: i64) -> RtResult<()>;
	async fn delete_all_clients(&self, scope: &TenantScope) -> RtResult<u64>;

	// # Properties
	async fn create_property(&self, data: &CreateProperty<'_>) -> RtResult<Property>;
	async fn read_property(&self, scope: &TenantScope, property_id: i64) -> RtResult<Property>;
	async fn list_properties(&self, scope: &TenantScope) -> RtResult<Vec<Property>>;
	async fn update_property(
		&self,
		scope: &TenantScope,
		property_id: i64,
		data: &UpdateProperty<'_>,
	) -> RtResult<Property>;
	async fn delete_property(&self, scope: &TenantScope, property_id: i64) -> RtResult<()>;
	async fn delete_all_properties(&self, scope: &TenantScope) -> RtResult<u64>;

	// # Rent agreements
	async fn create_agreement(&self, data: &CreateAgreement<'_>) -> RtResult<RentAgreement>;
	async fn read_agreement(&self, scope: &TenantScope, agreement_id: i64)
		-> RtResult<RentAgreement>;
	async fn list_agreements(&self, scope: &TenantScope) -> RtResult<Vec<RentAgreement>>;
	async fn update_agreement(
		&self,
		scope: &TenantScope,
		agreement_id: i64,
		data: &UpdateAgreement<'_>,
	) -> RtResult<RentAgreement>;
	async fn delete_agreement(&self, scope: &TenantScope, agreement_id: i64) -> RtResult<()>;
	async fn delete_all_agreements(&self, scope: &TenantScope) -> RtResult<u64>;

	// # Rent transactions
	async fn create_transaction(&self, data: &CreateTransaction<'_>) -> RtResult<RentTransaction>;
	async fn read_transaction(
		&self,
		scope: &TenantScope,
		transaction_id: i64,
	) -> RtResult<RentTransaction>;
	async fn list_transactions(&self, scope: &TenantScope) -> RtResult<Vec<RentTransaction>>;
	/// Transactions whose client reference is in the given identity set
	async fn list_transactions_for_clients(
		&self,
		client_ids: &[i64],
	) -> RtResult<Vec<RentTransaction>>;
	async fn delete_transaction(&self, scope: &TenantScope, transaction_id: i64) -> RtResult<()>;
	async fn delete_all_transactions(&self, scope: &TenantScope) -> RtResult<u64>;
}


// vim: ts=4
