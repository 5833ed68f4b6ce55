use std::{env, sync::Arc};

use rentra::AppBuilder;
use rentra::email::sender::{SmtpConfig, SmtpEmailSender};
use rentra::idp::MicrosoftGraphAdapter;
use rentra_store_adapter_sqlite::StoreAdapterSqlite;

fn env_or(name: &str, default: &str) -> String {
	env::var(name).unwrap_or_else(|_| default.to_string())
}

/// SMTP is optional: without it the server runs, but OTP, welcome and
/// password-reset mail endpoints answer 503.
fn smtp_config_from_env() -> Option<SmtpConfig> {
	let host = env::var("RENTRA_SMTP_HOST").ok()?;
	Some(SmtpConfig {
		host: host.into(),
		port: env_or("RENTRA_SMTP_PORT", "587").parse().ok()?,
		username: env_or("RENTRA_SMTP_USERNAME", "").into(),
		password: env_or("RENTRA_SMTP_PASSWORD", "").into(),
		from_name: env_or("RENTRA_SMTP_FROM_NAME", "Rentra").into(),
		from_address: env::var("RENTRA_SMTP_FROM_ADDRESS").ok()?.into(),
		tls_mode: env_or("RENTRA_SMTP_TLS", "starttls").into(),
		timeout_seconds: env_or("RENTRA_SMTP_TIMEOUT", "10").parse().ok()?,
	})
}

#[tokio::main]
async fn main() {
	let db_path = env_or("RENTRA_DB", "./data/rentra.db");
	let store_adapter = match StoreAdapterSqlite::new(&db_path).await {
		Ok(adapter) => Arc::new(adapter),
		Err(err) => {
			eprintln!("FATAL: cannot open database {}: {}", db_path, err);
			std::process::exit(1);
		}
	};

	let jwt_secret = match env::var("RENTRA_JWT_SECRET") {
		Ok(secret) if !secret.is_empty() => secret,
		_ => {
			eprintln!("FATAL: RENTRA_JWT_SECRET is not set");
			std::process::exit(1);
		}
	};

	let mut builder = AppBuilder::new();
	builder
		.listen(env_or("RENTRA_LISTEN", "127.0.0.1:8080"))
		.reset_link_base(env_or("RENTRA_RESET_LINK_BASE", "http://localhost:8080"))
		.jwt_key(env_or("RENTRA_JWT_KID", "default"), jwt_secret)
		.store_adapter(store_adapter)
		.idp_adapter(Arc::new(MicrosoftGraphAdapter::new()));

	match smtp_config_from_env().map(SmtpEmailSender::new) {
		Some(Ok(sender)) => {
			builder.email_adapter(Arc::new(sender));
		}
		Some(Err(err)) => {
			eprintln!("FATAL: bad SMTP configuration: {}", err);
			std::process::exit(1);
		}
		None => (),
	}

	if let Err(err) = builder.run().await {
		eprintln!("FATAL: {}", err);
		std::process::exit(1);
	}
}

// vim: ts=4
