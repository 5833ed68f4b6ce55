//! App state type

use std::sync::Arc;

use crate::core::token::TokenService;
use crate::prelude::*;
use crate::routes;

use rentra_types::email_adapter::EmailAdapter;
use rentra_types::idp_adapter::IdentityProviderAdapter;
use rentra_types::otp::{MemoryOtpStore, OtpStore};
use rentra_types::store_adapter::StoreAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,
	pub token_service: TokenService,

	pub store_adapter: Arc<dyn StoreAdapter>,
	pub email_adapter: Option<Arc<dyn EmailAdapter>>,
	pub idp_adapter: Option<Arc<dyn IdentityProviderAdapter>>,
	pub otp_store: Arc<dyn OtpStore>,
}

pub type App = Arc<AppState>;

pub struct Adapters {
	pub store_adapter: Option<Arc<dyn StoreAdapter>>,
	pub email_adapter: Option<Arc<dyn EmailAdapter>>,
	pub idp_adapter: Option<Arc<dyn IdentityProviderAdapter>>,
	pub otp_store: Option<Arc<dyn OtpStore>>,
}

#[derive(Debug)]
pub struct AppBuilderOpts {
	listen: Box<str>,
	/// Base URL used when composing password-reset links
	pub reset_link_base: Box<str>,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	jwt_keys: Vec<(Box<str>, Box<str>)>,
	jwt_active_kid: Option<Box<str>>,
	adapters: Adapters,
}

impl AppBuilder {
	pub fn new() -> Self {
		AppBuilder {
			opts: AppBuilderOpts {
				listen: "127.0.0.1:8080".into(),
				reset_link_base: "http://localhost:8080".into(),
			},
			jwt_keys: Vec::new(),
			jwt_active_kid: None,
			adapters: Adapters {
				store_adapter: None,
				email_adapter: None,
				idp_adapter: None,
				otp_store: None,
			},
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self { self.opts.listen = listen.into(); self }
	pub fn reset_link_base(&mut self, base: impl Into<Box<str>>) -> &mut Self { self.opts.reset_link_base = base.into(); self }
	pub fn jwt_key(&mut self, kid: impl Into<Box<str>>, secret: impl Into<Box<str>>) -> &mut Self {
		self.jwt_keys.push((kid.into(), secret.into()));
		self
	}
	pub fn jwt_active_kid(&mut self, kid: impl Into<Box<str>>) -> &mut Self { self.jwt_active_kid = Some(kid.into()); self }

	// Adapters
	pub fn store_adapter(&mut self, store_adapter: Arc<dyn StoreAdapter>) -> &mut Self { self.adapters.store_adapter = Some(store_adapter); self }
	pub fn email_adapter(&mut self, email_adapter: Arc<dyn EmailAdapter>) -> &mut Self { self.adapters.email_adapter = Some(email_adapter); self }
	pub fn idp_adapter(&mut self, idp_adapter: Arc<dyn IdentityProviderAdapter>) -> &mut Self { self.adapters.idp_adapter = Some(idp_adapter); self }
	pub fn otp_store(&mut self, otp_store: Arc<dyn OtpStore>) -> &mut Self { self.adapters.otp_store = Some(otp_store); self }

	/// Assemble the application state without binding a listener. Exposed
	/// so tests can drive the router directly.
	pub fn build(self) -> RtResult<App> {
		let store_adapter = self
			.adapters
			.store_adapter
			.ok_or(Error::ConfigError("no store adapter".into()))?;
		let active_kid = self
			.jwt_active_kid
			.or_else(|| self.jwt_keys.first().map(|(kid, _)| kid.clone()))
			.ok_or(Error::ConfigError("no JWT signing keys configured".into()))?;
		let token_service = TokenService::new(self.jwt_keys, active_kid)?;

		Ok(Arc::new(AppState {
			opts: self.opts,
			token_service,
			store_adapter,
			email_adapter: self.adapters.email_adapter,
			idp_adapter: self.adapters.idp_adapter,
			otp_store: self.adapters.otp_store.unwrap_or_else(|| Arc::new(MemoryOtpStore::new())),
		}))
	}

	pub async fn run(self) -> RtResult<()> {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.init();
		info!("Rentra v{}", VERSION);

		let app = self.build()?;
		let router = routes::init(app.clone());

		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await?;
		info!("Listening on {}", app.opts.listen);
		axum::serve(listener, router).await?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self { Self::new() }
}

// vim: ts=4
