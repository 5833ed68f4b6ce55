//! Entity CRUD tests: properties, rent agreements, rent transactions

use rust_decimal::Decimal;
use std::str::FromStr;

use rentra_store_adapter_sqlite::StoreAdapterSqlite;
use rentra_types::prelude::*;
use rentra_types::store_adapter::{
	CreateAgreement, CreateClient, CreateOwner, CreateProperty, CreateTransaction, StoreAdapter,
	SubscriptionStatus, UpdateAgreement, UpdateProperty,
};

const TENANT: &str = "tenant_m1abc_0f3a9b2c";

async fn create_test_adapter() -> StoreAdapterSqlite {
	StoreAdapterSqlite::new_in_memory().await.expect("Failed to create adapter")
}

fn scope() -> TenantScope {
	TenantScope::Scoped(TenantId::from(TENANT))
}

async fn seed_owner(adapter: &StoreAdapterSqlite) -> i64 {
	adapter
		.create_owner(&CreateOwner {
			tenant_id: TENANT,
			name: "Owner",
			email: "owner@example.com",
			password_hash: "$2b$10$hash",
			phone: "9876543210",
			alternate_phone: None,
			national_id: "123456789012",
			tax_id: None,
			address: "12 Lake Rd",
			city: "Pune",
			state: "MH",
			pincode: "411001",
			company_name: None,
			business_type: "Individual",
			gst_number: None,
			bank_account_number: None,
			ifsc_code: None,
			bank_name: None,
			trial_start_date: Timestamp::now(),
			trial_end_date: Timestamp::from_now(30 * 24 * 3600),
			subscription_status: SubscriptionStatus::Trial,
		})
		.await
		.expect("Failed to create owner")
		.owner_id
}

async fn seed_property(adapter: &StoreAdapterSqlite, owner_id: i64) -> i64 {
	adapter
		.create_property(&CreateProperty {
			tenant_id: TENANT,
			pincode: "411001",
			address1: "Flat 2",
			address2: "Lake Rd",
			city: "Pune",
			state: "MH",
			owner_id,
		})
		.await
		.expect("Failed to create property")
		.property_id
}

async fn seed_client(adapter: &StoreAdapterSqlite, owner_id: i64, email: &str) -> i64 {
	adapter
		.create_client(&CreateClient {
			tenant_id: TENANT,
			name: "Renter",
			gender: None,
			father_name: None,
			address1: None,
			address2: None,
			mobile_number: None,
			email: Some(email),
			password_hash: None,
			owner_id,
		})
		.await
		.expect("Failed to create client")
		.client_id
}

#[tokio::test]
async fn test_property_crud() {
	let adapter = create_test_adapter().await;
	let owner_id = seed_owner(&adapter).await;
	let property_id = seed_property(&adapter, owner_id).await;

	let update = UpdateProperty { city: Some("Mumbai"), ..Default::default() };
	let updated = adapter.update_property(&scope(), property_id, &update).await.unwrap();
	assert_eq!(updated.city.as_ref(), "Mumbai");
	assert_eq!(updated.address1.as_ref(), "Flat 2");

	adapter.delete_property(&scope(), property_id).await.unwrap();
	assert!(matches!(adapter.read_property(&scope(), property_id).await, Err(Error::NotFound)));
	// deleting again reports not found
	assert!(matches!(adapter.delete_property(&scope(), property_id).await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_agreement_decimal_round_trip() {
	let adapter = create_test_adapter().await;
	let owner_id = seed_owner(&adapter).await;
	let property_id = seed_property(&adapter, owner_id).await;
	let client_id = seed_client(&adapter, owner_id, "renter@example.com").await;

	let monthly_rent = Decimal::from_str("15750.50").unwrap();
	let deposit = Decimal::from_str("47251.01").unwrap();
	let agreement = adapter
		.create_agreement(&CreateAgreement {
			tenant_id: TENANT,
			electricity_meter_number: "MH-12-EM-0042",
			monthly_rent,
			security_deposit_amount: deposit,
			increment_percentage: Decimal::from_str("7.5").unwrap(),
			increment_schedule: Decimal::from(12),
			payment_date: Some("5"),
			payment_mode: "UPI",
			client_id,
			property_id,
			owner_id,
		})
		.await
		.unwrap();

	// exact decimal values survive storage
	let reread = adapter.read_agreement(&scope(), agreement.agreement_id).await.unwrap();
	assert_eq!(reread.monthly_rent, monthly_rent);
	assert_eq!(reread.security_deposit_amount, deposit);
	assert_eq!(reread.increment_percentage, Decimal::from_str("7.5").unwrap());

	let new_rent = Decimal::from_str("16931.79").unwrap();
	let updated = adapter
		.update_agreement(
			&scope(),
			agreement.agreement_id,
			&UpdateAgreement { monthly_rent: Some(new_rent), ..Default::default() },
		)
		.await
		.unwrap();
	assert_eq!(updated.monthly_rent, new_rent);
	assert_eq!(updated.security_deposit_amount, deposit);
}

#[tokio::test]
async fn test_transaction_list_for_clients() {
	let adapter = create_test_adapter().await;
	let owner_id = seed_owner(&adapter).await;
	let property_id = seed_property(&adapter, owner_id).await;
	let client1 = seed_client(&adapter, owner_id, "r1@example.com").await;
	let client2 = seed_client(&adapter, owner_id, "r2@example.com").await;

	for (client_id, from) in [(client1, "2026-01-01"), (client1, "2026-02-01"), (client2, "2026-01-01")]
	{
		adapter
			.create_transaction(&CreateTransaction {
				tenant_id: TENANT,
				rent_from: from,
				rent_to: "2026-12-31",
				payment_threshold: "15000",
				payment_mode: "UPI",
				client_id,
				property_id,
				agreement_id: 1,
				owner_id,
			})
			.await
			.unwrap();
	}

	let txns = adapter.list_transactions_for_clients(&[client1]).await.unwrap();
	assert_eq!(txns.len(), 2);
	assert!(txns.iter().all(|t| t.client_id == client1));

	let both = adapter.list_transactions_for_clients(&[client1, client2]).await.unwrap();
	assert_eq!(both.len(), 3);

	let none = adapter.list_transactions_for_clients(&[]).await.unwrap();
	assert!(none.is_empty());
}

#[tokio::test]
async fn test_delete_all_is_idempotent() {
	let adapter = create_test_adapter().await;
	let owner_id = seed_owner(&adapter).await;
	seed_property(&adapter, owner_id).await;
	seed_property(&adapter, owner_id).await;

	assert_eq!(adapter.delete_all_properties(&scope()).await.unwrap(), 2);
	// empty table is not an error
	assert_eq!(adapter.delete_all_properties(&scope()).await.unwrap(), 0);
	assert_eq!(adapter.delete_all_transactions(&scope()).await.unwrap(), 0);
	assert_eq!(adapter.delete_all_agreements(&scope()).await.unwrap(), 0);
}

// vim: ts=4
