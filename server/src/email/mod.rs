//! Email subsystem

pub mod sender;

pub use sender::{SmtpConfig, SmtpEmailSender};

// vim: ts=4
