//! Authentication: registration, login, OTP verification, password reset
//! and the external SSO exchange.

pub mod handler;
pub mod register;

// vim: ts=4
