//! Custom middlewares

use axum::{
	body::Body,
	extract::State,
	http::{Request, header, response::Response},
	middleware::Next,
};

use crate::core::Auth;
use crate::prelude::*;

fn bearer_token(req: &Request<Body>) -> Option<&str> {
	let auth_header = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
	auth_header.strip_prefix("Bearer ").map(str::trim)
}

pub async fn require_auth(
	State(state): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> RtResult<Response<Body>> {
	let token = bearer_token(&req).ok_or(Error::Unauthorized)?;
	let claims = state.token_service.verify(token)?;

	req.extensions_mut().insert(Auth(claims));

	Ok(next.run(req).await)
}

// vim: ts=4
