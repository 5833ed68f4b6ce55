//! Shared helpers for driving the router end to end.
//!
//! Tests run against the real route table and an in-memory store, with no
//! listener bound; requests go through `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::{
	Router,
	body::Body,
	http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use rentra::core::token::AuthClaims;
use rentra::{App, AppBuilder, routes};
use rentra_store_adapter_sqlite::StoreAdapterSqlite;
use rentra_types::prelude::Role;

pub async fn test_app() -> (App, Router) {
	let store = StoreAdapterSqlite::new_in_memory().await.unwrap();
	let mut builder = AppBuilder::new();
	builder.jwt_key("test", "test-signing-secret").store_adapter(Arc::new(store));
	let app = builder.build().unwrap();
	let router = routes::init(app.clone());
	(app, router)
}

pub async fn send(
	router: &Router,
	method: &str,
	uri: &str,
	token: Option<&str>,
	body: Option<Value>,
) -> (StatusCode, Value) {
	let mut builder = Request::builder().method(method).uri(uri);
	if let Some(token) = token {
		builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
	}
	let req = match body {
		Some(body) => builder
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(body.to_string()))
			.unwrap(),
		None => builder.body(Body::empty()).unwrap(),
	};

	let res = router.clone().oneshot(req).await.unwrap();
	let status = res.status();
	let bytes = res.into_body().collect().await.unwrap().to_bytes();
	let value = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).unwrap_or(Value::Null)
	};
	(status, value)
}

pub fn register_body(name: &str, email: &str, national_id: &str) -> Value {
	json!({
		"name": name,
		"email": email,
		"password": "hunter2hunter2",
		"phone": "9876543210",
		"nationalId": national_id,
		"address": "12 Test Lane",
		"city": "Pune",
		"state": "MH",
		"pincode": "411001",
	})
}

/// Registers an owner and returns `(token, tenant_id)`.
pub async fn register_owner(router: &Router, name: &str, email: &str, national_id: &str) -> (String, String) {
	let (status, body) =
		send(router, "POST", "/api/owner/self-register", None, Some(register_body(name, email, national_id))).await;
	assert_eq!(status, StatusCode::CREATED, "registration failed: {}", body);
	(
		body["token"].as_str().unwrap().to_string(),
		body["tenant_id"].as_str().unwrap().to_string(),
	)
}

/// Mints a platform-level token directly; the SSO exchange needs a live
/// identity provider, which these tests do not have.
pub fn superadmin_token(app: &App) -> String {
	app.token_service
		.issue(&AuthClaims {
			user_id: 1,
			email: "admin@example.com".into(),
			name: "Admin".into(),
			role: Role::SuperAdmin,
			tenant_id: None,
		})
		.unwrap()
		.into()
}

pub async fn create_client(router: &Router, token: &str, name: &str, body_extra: Value) -> Value {
	let mut body = json!({ "name": name });
	if let (Value::Object(map), Value::Object(extra)) = (&mut body, body_extra) {
		map.extend(extra);
	}
	let (status, body) = send(router, "POST", "/api/clients", Some(token), Some(body)).await;
	assert_eq!(status, StatusCode::CREATED, "client creation failed: {}", body);
	body
}

pub async fn create_property(router: &Router, token: &str, city: &str) -> Value {
	let body = json!({
		"pincode": "411001",
		"address1": "42 Market Road",
		"address2": "",
		"city": city,
		"state": "MH",
	});
	let (status, body) = send(router, "POST", "/api/properties", Some(token), Some(body)).await;
	assert_eq!(status, StatusCode::CREATED, "property creation failed: {}", body);
	body
}

pub async fn create_agreement(router: &Router, token: &str, client_id: i64, property_id: i64) -> Value {
	let body = json!({
		"electricityMeterNumber": "EM-1001",
		"monthlyRent": "12500.00",
		"securityDepositAmount": "25000.00",
		"incrementPercentage": "5",
		"incrementSchedule": "12",
		"paymentMode": "upi",
		"clientId": client_id,
		"propertyId": property_id,
	});
	let (status, body) = send(router, "POST", "/api/agreements", Some(token), Some(body)).await;
	assert_eq!(status, StatusCode::CREATED, "agreement creation failed: {}", body);
	body
}

pub async fn create_transaction(
	router: &Router,
	token: &str,
	client_id: i64,
	property_id: i64,
	agreement_id: i64,
) -> Value {
	let body = json!({
		"rentFrom": "2026-01-01",
		"rentTo": "2026-01-31",
		"paymentThreshold": "5",
		"paymentMode": "upi",
		"clientId": client_id,
		"propertyId": property_id,
		"agreementId": agreement_id,
	});
	let (status, body) = send(router, "POST", "/api/transactions", Some(token), Some(body)).await;
	assert_eq!(status, StatusCode::CREATED, "transaction creation failed: {}", body);
	body
}

// vim: ts=4
