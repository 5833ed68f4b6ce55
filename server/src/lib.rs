//! Rentra is a multi-tenant rental-property management backend.
//!
//! # Features
//!
//!	- Multi-tenant: every Owner account owns an isolated data partition
//!	- JWT authentication with rotating signing keys
//!	- Role-based authorization (Owner, ClientMaster, SuperAdmin)
//!	- Owner self-registration with a 30-day trial window
//!	- Rent lifecycle entities: clients, properties, agreements, transactions
//!	- OTP email verification and password reset workflows
//!	- SuperAdmin bootstrap through an external identity provider

#![forbid(unsafe_code)]

pub mod core;
pub mod auth;
pub mod owner;
pub mod client;
pub mod property;
pub mod agreement;
pub mod transaction;
pub mod email;
pub mod idp;
pub mod prelude;
pub mod routes;
pub mod types;

pub use crate::core::app::{App, AppBuilder};

// vim: ts=4
