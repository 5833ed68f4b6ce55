//! Keyed one-time-code store.
//!
//! The store is an explicit abstraction injected into the registration
//! workflow so it can be swapped for a distributed cache in multi-instance
//! deployments. The in-memory implementation is process-local and lost on
//! restart — an accepted limitation for single-instance use.

use parking_lot::Mutex;
use rand::RngExt;
use std::collections::HashMap;
use std::fmt::Debug;

use crate::prelude::*;

/// Codes expire after 5 minutes
pub const OTP_TTL_SECONDS: i64 = 300;
/// At most 3 verification attempts per stored code
pub const OTP_MAX_ATTEMPTS: u32 = 3;

/// Outcome of a verification attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OtpOutcome {
	Verified,
	NotFound,
	Expired,
	TooManyAttempts,
	Mismatch,
}

impl OtpOutcome {
	pub fn message(&self) -> &'static str {
		match self {
			OtpOutcome::Verified => "OTP verified successfully",
			OtpOutcome::NotFound => "OTP not found or expired",
			OtpOutcome::Expired => "OTP has expired",
			OtpOutcome::TooManyAttempts => "Maximum OTP attempts exceeded",
			OtpOutcome::Mismatch => "Invalid OTP",
		}
	}
}

/// Generate a 6-digit numeric code
pub fn generate_otp() -> Box<str> {
	let mut rng = rand::rng();
	let code: u32 = rng.random_range(100_000..1_000_000);
	code.to_string().into()
}

pub trait OtpStore: Debug + Send + Sync {
	/// Stores a code for the identifier, replacing any previous one
	fn put(&self, identifier: &str, code: &str);
	/// Verifies a code. The entry is consumed on success, expiry and
	/// attempt exhaustion; a plain mismatch only burns an attempt.
	fn verify(&self, identifier: &str, code: &str) -> OtpOutcome;
}

#[derive(Debug)]
struct OtpEntry {
	code: Box<str>,
	expires_at: Timestamp,
	attempts: u32,
}

/// In-memory OTP store keyed by identifier (email address)
#[derive(Debug, Default)]
pub struct MemoryOtpStore {
	entries: Mutex<HashMap<Box<str>, OtpEntry>>,
}

impl MemoryOtpStore {
	pub fn new() -> Self {
		Self::default()
	}
}

impl OtpStore for MemoryOtpStore {
	fn put(&self, identifier: &str, code: &str) {
		let mut entries = self.entries.lock();
		entries.insert(
			Box::from(identifier),
			OtpEntry {
				code: Box::from(code),
				expires_at: Timestamp::from_now(OTP_TTL_SECONDS),
				attempts: 0,
			},
		);
	}

	fn verify(&self, identifier: &str, code: &str) -> OtpOutcome {
		let mut entries = self.entries.lock();
		let Some(entry) = entries.get_mut(identifier) else {
			return OtpOutcome::NotFound;
		};

		if Timestamp::now() > entry.expires_at {
			entries.remove(identifier);
			return OtpOutcome::Expired;
		}

		if entry.attempts >= OTP_MAX_ATTEMPTS {
			entries.remove(identifier);
			return OtpOutcome::TooManyAttempts;
		}

		entry.attempts += 1;

		if entry.code.as_ref() != code {
			return OtpOutcome::Mismatch;
		}

		entries.remove(identifier);
		OtpOutcome::Verified
	}
}


// vim: ts=4
