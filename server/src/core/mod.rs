//! Core subsystem. This handles the core infrastructure of Rentra.

pub mod app;
pub mod extract;
pub mod middleware;
pub mod policy;
pub mod scope;
pub mod token;

pub use crate::core::extract::Auth;

// vim: ts=4
