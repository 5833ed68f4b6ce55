use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::token::AuthClaims;
use crate::prelude::*;

// Extractors //
//************//

// Auth //
//******//
#[derive(Debug, Clone)]
pub struct Auth(pub AuthClaims);

impl<S> FromRequestParts<S> for Auth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(auth) = parts.extensions.get::<Auth>().cloned() {
			Ok(auth)
		} else {
			Err(Error::Unauthorized)
		}
	}
}

// vim: ts=4
