use axum::{Router, middleware, routing::{delete, get, post, put}};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::App;
use crate::agreement;
use crate::auth;
use crate::client;
use crate::core::middleware::require_auth;
use crate::owner;
use crate::property;
use crate::transaction;

pub fn init(state: App) -> Router {
	let protected_router = Router::new()
		.route("/api/owners", get(owner::handler::get_owners))
		.route("/api/owners", post(owner::handler::post_owner))
		.route("/api/owners", delete(owner::handler::delete_owners))
		.route("/api/owners/{id}", get(owner::handler::get_owner))
		.route("/api/owners/{id}", put(owner::handler::put_owner))
		.route("/api/owners/{id}", delete(owner::handler::delete_owner))
		.route("/api/clients", get(client::handler::get_clients))
		.route("/api/clients", post(client::handler::post_client))
		.route("/api/clients", delete(client::handler::delete_clients))
		.route("/api/clients/{id}", get(client::handler::get_client))
		.route("/api/clients/{id}", put(client::handler::put_client))
		.route("/api/clients/{id}", delete(client::handler::delete_client))
		.route("/api/properties", get(property::handler::get_properties))
		.route("/api/properties", post(property::handler::post_property))
		.route("/api/properties", delete(property::handler::delete_properties))
		.route("/api/properties/{id}", get(property::handler::get_property))
		.route("/api/properties/{id}", put(property::handler::put_property))
		.route("/api/properties/{id}", delete(property::handler::delete_property))
		.route("/api/agreements", get(agreement::handler::get_agreements))
		.route("/api/agreements", post(agreement::handler::post_agreement))
		.route("/api/agreements", delete(agreement::handler::delete_agreements))
		.route("/api/agreements/{id}", get(agreement::handler::get_agreement))
		.route("/api/agreements/{id}", put(agreement::handler::put_agreement))
		.route("/api/agreements/{id}", delete(agreement::handler::delete_agreement))
		.route("/api/transactions", get(transaction::handler::get_transactions))
		.route("/api/transactions", post(transaction::handler::post_transaction))
		.route("/api/transactions", delete(transaction::handler::delete_transactions))
		.route("/api/transactions/{id}", get(transaction::handler::get_transaction))
		.route("/api/transactions/{id}", delete(transaction::handler::delete_transaction))
		.layer(middleware::from_fn_with_state(state.clone(), require_auth));

	let public_router = Router::new()
		.route("/api/health", get(auth::handler::get_health))
		.route("/api/login", post(auth::handler::post_login))
		.route("/api/owner/self-register", post(auth::register::post_self_register))
		.route("/api/owner/login", post(auth::handler::post_owner_login))
		.route("/api/owner/send-otp", post(auth::handler::post_send_otp))
		.route("/api/owner/verify-otp", post(auth::handler::post_verify_otp))
		.route("/api/forgot-password", post(auth::handler::post_forgot_password))
		.route("/api/reset-password/{id}/{token}", post(auth::handler::post_reset_password))
		.route("/api/auth/sso-exchange", post(auth::handler::post_sso_exchange));

	Router::new()
		.merge(public_router)
		.merge(protected_router)
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
		.with_state(state)
}

// vim: ts=4
