pub use rentra_types::prelude::*;

pub use crate::core::app::App;

// vim: ts=4
