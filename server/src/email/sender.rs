//! SMTP email sender using lettre
//!
//! Handles SMTP connection and email delivery from injected configuration.

use async_trait::async_trait;
use lettre::transport::smtp::SmtpTransport;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, Transport};
use std::time::Duration;

use crate::prelude::*;
use rentra_types::email_adapter::{EmailAdapter, EmailMessage};

#[derive(Clone, Debug)]
pub struct SmtpConfig {
	pub host: Box<str>,
	pub port: u16,
	pub username: Box<str>,
	pub password: Box<str>,
	pub from_name: Box<str>,
	pub from_address: Box<str>,
	/// "none", "starttls" or "tls"
	pub tls_mode: Box<str>,
	pub timeout_seconds: u64,
}

/// SMTP email sender
#[derive(Debug)]
pub struct SmtpEmailSender {
	config: SmtpConfig,
}

impl SmtpEmailSender {
	pub fn new(config: SmtpConfig) -> RtResult<Self> {
		if !config.from_address.contains('@') {
			return Err(Error::ConfigError("Invalid from email address".into()));
		}
		Ok(Self { config })
	}

	fn tls(&self) -> RtResult<lettre::transport::smtp::client::Tls> {
		use lettre::transport::smtp::client::{Tls, TlsParameters};

		match self.config.tls_mode.as_ref() {
			"tls" => Ok(Tls::Wrapper(
				TlsParameters::builder(self.config.host.to_string())
					.build()
					.map_err(|e| Error::ConfigError(format!("TLS configuration error: {}", e)))?,
			)),
			"starttls" => Ok(Tls::Opportunistic(
				TlsParameters::builder(self.config.host.to_string())
					.build()
					.map_err(|e| Error::ConfigError(format!("TLS configuration error: {}", e)))?,
			)),
			"none" => Ok(Tls::None),
			mode => Err(Error::ConfigError(format!(
				"Invalid TLS mode: {}. Must be 'none', 'starttls', or 'tls'",
				mode
			))),
		}
	}
}

#[async_trait]
impl EmailAdapter for SmtpEmailSender {
	async fn send(&self, message: EmailMessage) -> RtResult<()> {
		if !message.to.contains('@') {
			return Err(Error::ValidationError("Invalid recipient email address".into()));
		}

		let email = Message::builder()
			.from(
				format!("{} <{}>", self.config.from_name, self.config.from_address)
					.parse()
					.map_err(|_| Error::ConfigError("Invalid from email format".into()))?,
			)
			.to(message
				.to
				.parse()
				.map_err(|_| Error::ValidationError("Invalid recipient email format".into()))?)
			.subject(message.subject.as_ref())
			.singlepart(lettre::message::SinglePart::plain(message.text_body.to_string()))
			.map_err(|e| Error::ValidationError(format!("Failed to build email: {}", e)))?;

		let credentials =
			Credentials::new(self.config.username.to_string(), self.config.password.to_string());
		let mailer = SmtpTransport::builder_dangerous(self.config.host.as_ref())
			.port(self.config.port)
			.timeout(Some(Duration::from_secs(self.config.timeout_seconds)))
			.tls(self.tls()?)
			.credentials(credentials)
			.build();

		match mailer.send(&email) {
			Ok(_) => {
				debug!("Email sent to {}", message.to);
				Ok(())
			}
			Err(e) => {
				warn!("Failed to send email to {}: {}", message.to, e);
				Err(Error::ServiceUnavailable(format!("SMTP send failed: {}", e)))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config(tls_mode: &str) -> SmtpConfig {
		SmtpConfig {
			host: "smtp.example.com".into(),
			port: 587,
			username: "mailer".into(),
			password: "secret".into(),
			from_name: "Rentra".into(),
			from_address: "noreply@example.com".into(),
			tls_mode: tls_mode.into(),
			timeout_seconds: 10,
		}
	}

	#[test]
	fn test_invalid_from_address_is_config_error() {
		let mut cfg = config("none");
		cfg.from_address = "not-an-address".into();
		assert!(matches!(SmtpEmailSender::new(cfg), Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_invalid_tls_mode_is_config_error() {
		let sender = SmtpEmailSender::new(config("ssl3")).unwrap();
		assert!(matches!(sender.tls(), Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_known_tls_modes() {
		for mode in ["none", "starttls", "tls"] {
			let sender = SmtpEmailSender::new(config(mode)).unwrap();
			assert!(sender.tls().is_ok());
		}
	}
}

// vim: ts=4
