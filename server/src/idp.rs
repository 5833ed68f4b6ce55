//! Microsoft Graph identity-provider adapter
//!
//! Verifies externally issued access tokens by calling the Graph `/me`
//! endpoint. Only the SSO exchange path uses this; regular Owner and
//! Client sessions never leave the process.

use async_trait::async_trait;
use http_body_util::{BodyExt, Empty};
use hyper::{body::Bytes, header, StatusCode};
use hyper_util::{client::legacy::Client, rt::TokioExecutor};
use serde::Deserialize;
use std::time::Duration;

use crate::prelude::*;
use rentra_types::idp_adapter::{ExternalProfile, IdentityProviderAdapter};

const GRAPH_ME_URL: &str = "https://graph.microsoft.com/v1.0/me";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub struct MicrosoftGraphAdapter {
	endpoint: Box<str>,
	timeout: Duration,
}

impl MicrosoftGraphAdapter {
	pub fn new() -> Self {
		Self::with_endpoint(GRAPH_ME_URL)
	}

	/// Point the adapter at an alternate `/me` endpoint (test stubs).
	pub fn with_endpoint(endpoint: impl Into<Box<str>>) -> Self {
		Self { endpoint: endpoint.into(), timeout: REQUEST_TIMEOUT }
	}
}

impl Default for MicrosoftGraphAdapter {
	fn default() -> Self {
		Self::new()
	}
}

/// The `/me` fields we care about. Personal accounts often leave `mail`
/// unset and carry the address in `userPrincipalName`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphProfile {
	id: Box<str>,
	mail: Option<Box<str>>,
	user_principal_name: Option<Box<str>>,
	display_name: Option<Box<str>>,
}

#[async_trait]
impl IdentityProviderAdapter for MicrosoftGraphAdapter {
	async fn verify(&self, external_token: &str) -> RtResult<ExternalProfile> {
		let req = hyper::Request::builder()
			.method(hyper::Method::GET)
			.uri(self.endpoint.as_ref())
			.header(header::AUTHORIZATION, format!("Bearer {}", external_token))
			.header(header::ACCEPT, "application/json")
			.body(Empty::<Bytes>::new())
			.map_err(|err| Error::ConfigError(format!("bad identity-provider endpoint: {}", err)))?;

		let https_connector = hyper_rustls::HttpsConnectorBuilder::new()
			.with_native_roots()
			.map_err(|_| Error::ConfigError("no native root CA certificates found".into()))?
			.https_or_http()
			.enable_http1()
			.build();
		let client: Client<_, Empty<Bytes>> =
			Client::builder(TokioExecutor::new()).build(https_connector);

		let resp = match tokio::time::timeout(self.timeout, client.request(req)).await {
			Ok(Ok(resp)) => resp,
			Ok(Err(err)) => {
				warn!("Identity provider unreachable: {}", err);
				return Err(Error::ServiceUnavailable("identity provider unreachable".into()));
			}
			Err(_) => {
				warn!("Identity provider timed out after {:?}", self.timeout);
				return Err(Error::ServiceUnavailable("identity provider timed out".into()));
			}
		};

		match resp.status() {
			status if status.is_success() => (),
			StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(Error::Unauthorized),
			status => {
				warn!("Identity provider returned {}", status);
				return Err(Error::ServiceUnavailable("identity provider error".into()));
			}
		}

		let body = resp
			.into_body()
			.collect()
			.await
			.map_err(|_| Error::ServiceUnavailable("identity provider error".into()))?
			.to_bytes();
		let profile: GraphProfile = serde_json::from_slice(&body)
			.map_err(|_| Error::ServiceUnavailable("unexpected identity provider response".into()))?;

		let email = profile
			.mail
			.or(profile.user_principal_name)
			.ok_or(Error::Unauthorized)?;
		let display_name = profile.display_name.unwrap_or_else(|| Box::from(email.as_ref()));

		Ok(ExternalProfile { id: profile.id, email, display_name })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_profile_email_fallback() {
		let with_mail: GraphProfile = serde_json::from_str(
			r#"{"id":"abc","mail":"a@example.com","userPrincipalName":"a@corp.example.com","displayName":"A"}"#,
		)
		.unwrap();
		assert_eq!(with_mail.mail.as_deref(), Some("a@example.com"));

		let principal_only: GraphProfile =
			serde_json::from_str(r#"{"id":"abc","userPrincipalName":"a@corp.example.com"}"#)
				.unwrap();
		assert!(principal_only.mail.is_none());
		assert_eq!(
			principal_only.mail.or(principal_only.user_principal_name).as_deref(),
			Some("a@corp.example.com")
		);
	}

	#[tokio::test]
	async fn test_unreachable_provider_is_service_unavailable() {
		// nothing listens on this port
		let adapter = MicrosoftGraphAdapter::with_endpoint("http://127.0.0.1:1/v1.0/me");
		let err = adapter.verify("token").await.unwrap_err();
		assert!(matches!(err, Error::ServiceUnavailable(_)));
	}
}

// vim: ts=4
