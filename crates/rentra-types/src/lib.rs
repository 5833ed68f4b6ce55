//! Shared types and adapter traits for the Rentra platform.
//!
//! This crate contains the foundational types shared between the server
//! crate and the adapter implementations: the error taxonomy, tenant and
//! role types, entity records, and the adapter traits for the store,
//! outbound email and the external identity provider.

pub mod email_adapter;
pub mod error;
pub mod idp_adapter;
pub mod otp;
pub mod prelude;
pub mod store_adapter;
pub mod types;

// vim: ts=4
