//! Common response types

use serde::Serialize;

#[derive(Serialize)]
pub struct Message {
	message: Box<str>,
}

impl Message {
	pub fn new(message: impl Into<Box<str>>) -> Self {
		Message { message: message.into() }
	}
}

/// Bulk-delete report; zero is a valid outcome
#[derive(Serialize)]
pub struct DeletedRes {
	#[serde(rename = "deletedCount")]
	pub deleted_count: u64,
}

// vim: ts=4
