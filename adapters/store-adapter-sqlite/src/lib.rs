//! SQLite implementation of the Rentra store adapter

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::{fmt::Debug, path::Path};

use rentra_types::prelude::*;
use rentra_types::store_adapter::{
	Client, CreateAgreement, CreateClient, CreateOwner, CreateProperty, CreateTransaction, Owner,
	PlatformUser, Property, RentAgreement, RentTransaction, StoreAdapter, UpdateAgreement,
	UpdateClient, UpdateOwner, UpdateProperty,
};

mod agreement;
mod client;
mod owner;
mod platform;
mod property;
mod schema;
mod transaction;
mod utils;

use schema::init_db;

#[derive(Debug)]
pub struct StoreAdapterSqlite {
	db: SqlitePool,
}

impl StoreAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> RtResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		init_db(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		Ok(Self { db })
	}

	/// Private in-memory database, used by tests. A single connection keeps
	/// every query on the same memory database.
	pub async fn new_in_memory() -> RtResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new().in_memory(true);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(1)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		init_db(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		Ok(Self { db })
	}
}

#[async_trait]
impl StoreAdapter for StoreAdapterSqlite {
	// Owners //
	//********//

	async fn create_owner(&self, data: &CreateOwner<'_>) -> RtResult<Owner> {
		owner::create(&self.db, data).await
	}

	async fn read_owner(&self, owner_id: i64) -> RtResult<Owner> {
		owner::read(&self.db, owner_id).await
	}

	async fn read_owner_by_email(&self, email: &str) -> RtResult<Owner> {
		owner::read_by_email(&self.db, email).await
	}

	async fn read_owner_by_tenant(&self, tenant_id: &str) -> RtResult<Owner> {
		owner::read_by_tenant(&self.db, tenant_id).await
	}

	async fn owner_exists(&self, email: &str, national_id: &str) -> RtResult<bool> {
		owner::exists(&self.db, email, national_id).await
	}

	async fn list_owners(&self) -> RtResult<Vec<Owner>> {
		owner::list(&self.db).await
	}

	async fn update_owner(&self, owner_id: i64, data: &UpdateOwner<'_>) -> RtResult<Owner> {
		owner::update(&self.db, owner_id, data).await
	}

	async fn update_owner_password(&self, owner_id: i64, password_hash: &str) -> RtResult<()> {
		owner::update_password(&self.db, owner_id, password_hash).await
	}

	async fn delete_owner(&self, owner_id: i64) -> RtResult<()> {
		owner::delete(&self.db, owner_id).await
	}

	async fn delete_all_owners(&self) -> RtResult<u64> {
		owner::delete_all(&self.db).await
	}

	// Platform users //
	//****************//

	async fn read_platform_user_by_email(&self, email: &str) -> RtResult<PlatformUser> {
		platform::read_by_email(&self.db, email).await
	}

	async fn create_platform_user(
		&self,
		email: &str,
		password_hash: &str,
	) -> RtResult<PlatformUser> {
		platform::create(&self.db, email, password_hash).await
	}

	// Clients //
	//*********//

	async fn create_client(&self, data: &CreateClient<'_>) -> RtResult<Client> {
		client::create(&self.db, data).await
	}

	async fn read_client(&self, scope: &TenantScope, client_id: i64) -> RtResult<Client> {
		client::read(&self.db, scope, client_id).await
	}

	async fn read_client_by_email(
		&self,
		scope: &TenantScope,
		email: &str,
	) -> RtResult<Option<Client>> {
		client::read_by_email(&self.db, scope, email).await
	}

	async fn list_clients(&self, scope: &TenantScope) -> RtResult<Vec<Client>> {
		client::list(&self.db, scope).await
	}

	async fn list_client_ids_by_email(&self, email: &str) -> RtResult<Vec<i64>> {
		client::list_ids_by_email(&self.db, email).await
	}

	async fn update_client(
		&self,
		scope: &TenantScope,
		client_id: i64,
		data: &UpdateClient<'_>,
	) -> RtResult<Client> {
		client::update(&self.db, scope, client_id, data).await
	}

	async fn update_client_password(&self, client_id: i64, password_hash: &str) -> RtResult<()> {
		client::update_password(&self.db, client_id, password_hash).await
	}

	async fn delete_client(&self, scope: &TenantScope, client_id: i64) -> RtResult<()> {
		client::delete(&self.db, scope, client_id).await
	}

	async fn delete_all_clients(&self, scope: &TenantScope) -> RtResult<u64> {
		client::delete_all(&self.db, scope).await
	}

	// Properties //
	//************//

	async fn create_property(&self, data: &CreateProperty<'_>) -> RtResult<Property> {
		property::create(&self.db, data).await
	}

	async fn read_property(&self, scope: &TenantScope, property_id: i64) -> RtResult<Property> {
		property::read(&self.db, scope, property_id).await
	}

	async fn list_properties(&self, scope: &TenantScope) -> RtResult<Vec<Property>> {
		property::list(&self.db, scope).await
	}

	async fn update_property(
		&self,
		scope: &TenantScope,
		property_id: i64,
		data: &UpdateProperty<'_>,
	) -> RtResult<Property> {
		property::update(&self.db, scope, property_id, data).await
	}

	async fn delete_property(&self, scope: &TenantScope, property_id: i64) -> RtResult<()> {
		property::delete(&self.db, scope, property_id).await
	}

	async fn delete_all_properties(&self, scope: &TenantScope) -> RtResult<u64> {
		property::delete_all(&self.db, scope).await
	}

	// Rent agreements //
	//*****************//

	async fn create_agreement(&self, data: &CreateAgreement<'_>) -> RtResult<RentAgreement> {
		agreement::create(&self.db, data).await
	}

	async fn read_agreement(
		&self,
		scope: &TenantScope,
		agreement_id: i64,
	) -> RtResult<RentAgreement> {
		agreement::read(&self.db, scope, agreement_id).await
	}

	async fn list_agreements(&self, scope: &TenantScope) -> RtResult<Vec<RentAgreement>> {
		agreement::list(&self.db, scope).await
	}

	async fn update_agreement(
		&self,
		scope: &TenantScope,
		agreement_id: i64,
		data: &UpdateAgreement<'_>,
	) -> RtResult<RentAgreement> {
		agreement::update(&self.db, scope, agreement_id, data).await
	}

	async fn delete_agreement(&self, scope: &TenantScope, agreement_id: i64) -> RtResult<()> {
		agreement::delete(&self.db, scope, agreement_id).await
	}

	async fn delete_all_agreements(&self, scope: &TenantScope) -> RtResult<u64> {
		agreement::delete_all(&self.db, scope).await
	}

	// Rent transactions //
	//*******************//

	async fn create_transaction(&self, data: &CreateTransaction<'_>) -> RtResult<RentTransaction> {
		transaction::create(&self.db, data).await
	}

	async fn read_transaction(
		&self,
		scope: &TenantScope,
		transaction_id: i64,
	) -> RtResult<RentTransaction> {
		transaction::read(&self.db, scope, transaction_id).await
	}

	async fn list_transactions(&self, scope: &TenantScope) -> RtResult<Vec<RentTransaction>> {
		transaction::list(&self.db, scope).await
	}

	async fn list_transactions_for_clients(
		&self,
		client_ids: &[i64],
	) -> RtResult<Vec<RentTransaction>> {
		transaction::list_for_clients(&self.db, client_ids).await
	}

	async fn delete_transaction(&self, scope: &TenantScope, transaction_id: i64) -> RtResult<()> {
		transaction::delete(&self.db, scope, transaction_id).await
	}

	async fn delete_all_transactions(&self, scope: &TenantScope) -> RtResult<u64> {
		transaction::delete_all(&self.db, scope).await
	}
}

// vim: ts=4
