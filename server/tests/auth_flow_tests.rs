//! Registration, login and trial lifecycle through the HTTP surface.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::*;
use rentra_types::prelude::TenantScope;
use rentra_types::store_adapter::{SubscriptionStatus, UpdateOwner};

#[tokio::test]
async fn test_self_register_returns_session() {
	let (_app, router) = test_app().await;

	let (status, body) = send(
		&router,
		"POST",
		"/api/owner/self-register",
		None,
		Some(register_body("Asha", "asha@example.com", "123456789012")),
	)
	.await;

	assert_eq!(status, StatusCode::CREATED);
	assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
	assert!(body["tenant_id"].as_str().unwrap().starts_with("tenant_"));
	assert_eq!(body["user"]["email"], "asha@example.com");
	assert_eq!(body["user"]["subscriptionStatus"], "trial");
	// password material never leaves the server
	assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_token_grants_access() {
	let (_app, router) = test_app().await;
	let (token, _) = register_owner(&router, "Asha", "asha@example.com", "123456789012").await;

	let (status, body) = send(&router, "GET", "/api/clients", Some(&token), None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
	let (_app, router) = test_app().await;
	register_owner(&router, "Asha", "asha@example.com", "123456789012").await;

	let (status, _) = send(
		&router,
		"POST",
		"/api/owner/self-register",
		None,
		Some(register_body("Asha Again", "asha@example.com", "123456789013")),
	)
	.await;
	assert_eq!(status, StatusCode::CONFLICT);

	// same national id, different email
	let (status, _) = send(
		&router,
		"POST",
		"/api/owner/self-register",
		None,
		Some(register_body("Someone Else", "other@example.com", "123456789012")),
	)
	.await;
	assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_validation() {
	let (_app, router) = test_app().await;

	let mut missing_name = register_body("", "a@example.com", "123456789012");
	missing_name["name"] = json!("   ");
	let (status, _) = send(&router, "POST", "/api/owner/self-register", None, Some(missing_name)).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);

	let (status, _) = send(
		&router,
		"POST",
		"/api/owner/self-register",
		None,
		Some(register_body("Asha", "a@example.com", "12345")),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_owner_login() {
	let (_app, router) = test_app().await;
	register_owner(&router, "Asha", "asha@example.com", "123456789012").await;

	let (status, body) = send(
		&router,
		"POST",
		"/api/owner/login",
		None,
		Some(json!({ "email": "asha@example.com", "password": "hunter2hunter2" })),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert!(body["token"].as_str().is_some());
	let days = body["daysRemainingInTrial"].as_i64().unwrap();
	assert!((29..=30).contains(&days), "unexpected trial window: {}", days);
}

#[tokio::test]
async fn test_owner_login_rejects_bad_credentials() {
	let (_app, router) = test_app().await;
	register_owner(&router, "Asha", "asha@example.com", "123456789012").await;

	let (status, _) = send(
		&router,
		"POST",
		"/api/owner/login",
		None,
		Some(json!({ "email": "asha@example.com", "password": "wrong-password" })),
	)
	.await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);

	// an unknown account looks the same as a bad password
	let (status, _) = send(
		&router,
		"POST",
		"/api/owner/login",
		None,
		Some(json!({ "email": "nobody@example.com", "password": "hunter2hunter2" })),
	)
	.await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_trial_blocks_login() {
	let (app, router) = test_app().await;
	register_owner(&router, "Asha", "asha@example.com", "123456789012").await;

	let owner = app.store_adapter.read_owner_by_email("asha@example.com").await.unwrap();
	app.store_adapter
		.update_owner(
			owner.owner_id,
			&UpdateOwner {
				name: None,
				email: None,
				phone: None,
				password_hash: None,
				subscription_status: Some(SubscriptionStatus::Expired),
			},
		)
		.await
		.unwrap();

	let (status, body) = send(
		&router,
		"POST",
		"/api/owner/login",
		None,
		Some(json!({ "email": "asha@example.com", "password": "hunter2hunter2" })),
	)
	.await;
	assert_eq!(status, StatusCode::FORBIDDEN);
	assert_eq!(body["trialExpired"], json!(true));
}

#[tokio::test]
async fn test_reset_password_with_colliding_ids() {
	let (app, router) = test_app().await;
	let (owner_token, _) = register_owner(&router, "Asha", "asha@example.com", "123456789012").await;
	let client = create_client(
		&router,
		&owner_token,
		"Ravi",
		json!({ "email": "ravi@example.com", "password": "ravi-secret-pw" }),
	)
	.await;
	let client_id = client["clientId"].as_i64().unwrap();

	// owner and client ids come from independent sequences and collide here
	let owner = app.store_adapter.read_owner_by_email("asha@example.com").await.unwrap();
	assert_eq!(owner.owner_id, client_id);

	let stored = app
		.store_adapter
		.read_client(&TenantScope::Unrestricted, client_id)
		.await
		.unwrap();
	let token = app
		.token_service
		.issue_reset(client_id, "ravi@example.com", stored.password_hash.as_deref().unwrap())
		.unwrap();

	let (status, body) = send(
		&router,
		"POST",
		&format!("/api/reset-password/{}/{}", client_id, token),
		None,
		Some(json!({ "password": "brand-new-pass" })),
	)
	.await;
	assert_eq!(status, StatusCode::OK, "client reset failed: {}", body);

	// the new credential works for the unified login
	let (status, _) = send(
		&router,
		"POST",
		"/api/login",
		None,
		Some(json!({ "email": "ravi@example.com", "password": "brand-new-pass" })),
	)
	.await;
	assert_eq!(status, StatusCode::OK);

	// the owner holding the same numeric id resets independently
	let token = app
		.token_service
		.issue_reset(owner.owner_id, "asha@example.com", &owner.password_hash)
		.unwrap();
	let (status, _) = send(
		&router,
		"POST",
		&format!("/api/reset-password/{}/{}", owner.owner_id, token),
		None,
		Some(json!({ "password": "owner-new-pass" })),
	)
	.await;
	assert_eq!(status, StatusCode::OK);

	let (status, _) = send(
		&router,
		"POST",
		"/api/owner/login",
		None,
		Some(json!({ "email": "asha@example.com", "password": "owner-new-pass" })),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
	let (_app, router) = test_app().await;

	let (status, _) = send(&router, "GET", "/api/clients", None, None).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);

	let (status, _) = send(&router, "GET", "/api/clients", Some("not-a-jwt"), None).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_mail_endpoints_need_email_adapter() {
	let (_app, router) = test_app().await;
	register_owner(&router, "Asha", "asha@example.com", "123456789012").await;

	let (status, _) = send(
		&router,
		"POST",
		"/api/forgot-password",
		None,
		Some(json!({ "email": "asha@example.com" })),
	)
	.await;
	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

	let (status, _) = send(
		&router,
		"POST",
		"/api/owner/send-otp",
		None,
		Some(json!({ "email": "asha@example.com" })),
	)
	.await;
	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_sso_exchange_without_idp_is_unavailable() {
	let (_app, router) = test_app().await;

	let (status, _) = send(
		&router,
		"POST",
		"/api/auth/sso-exchange",
		None,
		Some(json!({ "accessToken": "some-graph-token" })),
	)
	.await;
	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_health() {
	let (_app, router) = test_app().await;
	let (status, _) = send(&router, "GET", "/api/health", None, None).await;
	assert_eq!(status, StatusCode::OK);
}

// vim: ts=4
