//! JWT issuing and verification
//!
//! Session tokens are HS256 JWTs carrying the authenticated identity and its
//! tenant partition. The signing secret is injected configuration, addressed
//! by a key id in the token header so keys can be rotated without
//! invalidating sessions signed by the previous key.
//!
//! Reset tokens are signed with a secret derived from the user's current
//! password hash, which makes every outstanding reset token die the moment
//! the password changes.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::prelude::*;

const SESSION_EXPIRE: i64 = 24 * 3600;
const RESET_EXPIRE: i64 = 5 * 60;

/// Authenticated identity carried by a session token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthClaims {
	pub user_id: i64,
	pub email: Box<str>,
	pub name: Box<str>,
	pub role: Role,
	pub tenant_id: Option<TenantId>,
}

#[derive(Serialize, Deserialize)]
struct SessionToken {
	sub: i64,
	email: Box<str>,
	name: Box<str>,
	role: Role,
	tenant_id: Option<TenantId>,
	exp: i64,
}

#[derive(Serialize, Deserialize)]
struct ResetToken {
	sub: i64,
	email: Box<str>,
	exp: i64,
}

/// Verified password-reset request
#[derive(Clone, Debug)]
pub struct ResetClaims {
	pub user_id: i64,
	pub email: Box<str>,
}

#[derive(Debug)]
pub struct TokenService {
	keys: HashMap<Box<str>, Box<str>>,
	active_kid: Box<str>,
}

impl TokenService {
	pub fn new(
		keys: impl IntoIterator<Item = (impl Into<Box<str>>, impl Into<Box<str>>)>,
		active_kid: impl Into<Box<str>>,
	) -> RtResult<Self> {
		let keys: HashMap<Box<str>, Box<str>> =
			keys.into_iter().map(|(kid, secret)| (kid.into(), secret.into())).collect();
		let active_kid = active_kid.into();

		if keys.is_empty() {
			return Err(Error::ConfigError("no JWT signing keys configured".into()));
		}
		if !keys.contains_key(&active_kid) {
			return Err(Error::ConfigError(format!("unknown active JWT key id: {}", active_kid)));
		}

		Ok(Self { keys, active_kid })
	}

	fn active_secret(&self) -> &str {
		// invariant checked in new()
		self.keys.get(&self.active_kid).map(|s| s.as_ref()).unwrap_or_default()
	}

	/// Issue a session token signed with the active key
	pub fn issue(&self, claims: &AuthClaims) -> RtResult<Box<str>> {
		let mut header = Header::new(Algorithm::HS256);
		header.kid = Some(self.active_kid.to_string());

		let token = encode(
			&header,
			&SessionToken {
				sub: claims.user_id,
				email: claims.email.clone(),
				name: claims.name.clone(),
				role: claims.role,
				tenant_id: claims.tenant_id.clone(),
				exp: Timestamp::from_now(SESSION_EXPIRE).0,
			},
			&EncodingKey::from_secret(self.active_secret().as_bytes()),
		)
		.map_err(|_| Error::Unauthorized)?;

		Ok(token.into())
	}

	/// Verify a session token. The `kid` header selects the verification
	/// key, so tokens signed by a rotated-out key keep verifying as long as
	/// that key stays configured.
	pub fn verify(&self, token: &str) -> RtResult<AuthClaims> {
		let header = decode_header(token).map_err(|_| Error::Unauthorized)?;
		let secret: &str = match header.kid.as_deref() {
			Some(kid) => self.keys.get(kid).ok_or(Error::Unauthorized)?.as_ref(),
			// tokens without a key id verify against the active key
			None => self.active_secret(),
		};

		let data = decode::<SessionToken>(
			token,
			&DecodingKey::from_secret(secret.as_bytes()),
			&Validation::new(Algorithm::HS256),
		)
		.map_err(|_| Error::Unauthorized)?;

		Ok(AuthClaims {
			user_id: data.claims.sub,
			email: data.claims.email,
			name: data.claims.name,
			role: data.claims.role,
			tenant_id: data.claims.tenant_id,
		})
	}

	fn reset_secret(&self, password_hash: &str) -> String {
		format!("{}{}", self.active_secret(), password_hash)
	}

	/// Issue a short-lived password-reset token bound to the current
	/// password hash
	pub fn issue_reset(
		&self,
		user_id: i64,
		email: &str,
		password_hash: &str,
	) -> RtResult<Box<str>> {
		let token = encode(
			&Header::new(Algorithm::HS256),
			&ResetToken {
				sub: user_id,
				email: email.into(),
				exp: Timestamp::from_now(RESET_EXPIRE).0,
			},
			&EncodingKey::from_secret(self.reset_secret(password_hash).as_bytes()),
		)
		.map_err(|_| Error::Unauthorized)?;

		Ok(token.into())
	}

	/// Verify a reset token against the stored password hash. Fails for
	/// tokens minted before a password change even inside their lifetime.
	pub fn verify_reset(&self, token: &str, password_hash: &str) -> RtResult<ResetClaims> {
		let data = decode::<ResetToken>(
			token,
			&DecodingKey::from_secret(self.reset_secret(password_hash).as_bytes()),
			&Validation::new(Algorithm::HS256),
		)
		.map_err(|_| Error::Unauthorized)?;

		Ok(ResetClaims { user_id: data.claims.sub, email: data.claims.email })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn service() -> TokenService {
		TokenService::new([("k1", "first secret"), ("k2", "second secret")], "k2").unwrap()
	}

	fn claims() -> AuthClaims {
		AuthClaims {
			user_id: 7,
			email: "asha@example.com".into(),
			name: "Asha".into(),
			role: Role::Owner,
			tenant_id: Some(TenantId::from("tenant_m1abc_0f3a9b2c")),
		}
	}

	#[test]
	fn test_session_round_trip() {
		let svc = service();
		let token = svc.issue(&claims()).unwrap();
		let verified = svc.verify(&token).unwrap();
		assert_eq!(verified, claims());
	}

	#[test]
	fn test_rotated_key_still_verifies() {
		let old = TokenService::new([("k1", "first secret")], "k1").unwrap();
		let token = old.issue(&claims()).unwrap();

		// k1 rotated out of active use but kept for verification
		let rotated = service();
		assert!(rotated.verify(&token).is_ok());
	}

	#[test]
	fn test_unknown_key_is_rejected() {
		let other = TokenService::new([("k9", "other secret")], "k9").unwrap();
		let token = other.issue(&claims()).unwrap();
		assert!(matches!(service().verify(&token), Err(Error::Unauthorized)));
	}

	#[test]
	fn test_garbage_token_is_rejected() {
		assert!(matches!(service().verify("not-a-token"), Err(Error::Unauthorized)));
		assert!(matches!(service().verify(""), Err(Error::Unauthorized)));
	}

	#[test]
	fn test_active_key_must_exist() {
		assert!(matches!(
			TokenService::new([("k1", "secret")], "k2"),
			Err(Error::ConfigError(_))
		));
	}

	#[test]
	fn test_reset_token_dies_with_password_change() {
		let svc = service();
		let token = svc.issue_reset(7, "asha@example.com", "$2b$10$oldhash").unwrap();

		let verified = svc.verify_reset(&token, "$2b$10$oldhash").unwrap();
		assert_eq!(verified.user_id, 7);

		// password changed, token no longer verifies
		assert!(matches!(
			svc.verify_reset(&token, "$2b$10$newhash"),
			Err(Error::Unauthorized)
		));
	}

	#[test]
	fn test_reset_token_is_not_a_session_token() {
		let svc = service();
		let token = svc.issue_reset(7, "asha@example.com", "$2b$10$hash").unwrap();
		assert!(svc.verify(&token).is_err());
	}
}

// vim: ts=4
