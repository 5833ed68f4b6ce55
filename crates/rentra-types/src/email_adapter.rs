//! Outbound email adapter trait.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

/// A plain-text email message
#[derive(Clone, Debug)]
pub struct EmailMessage {
	pub to: Box<str>,
	pub subject: Box<str>,
	pub text_body: Box<str>,
}

/// Adapter for outbound email delivery (password-reset links, OTP codes).
///
/// Implementations must surface delivery failures to the caller instead
/// of hanging; no retries happen at this layer.
#[async_trait]
pub trait EmailAdapter: Debug + Send + Sync {
	async fn send(&self, message: EmailMessage) -> RtResult<()>;
}

// vim: ts=4
