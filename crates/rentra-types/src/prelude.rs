pub use crate::error::{Error, RtResult};
pub use crate::types::{Role, TenantId, TenantScope, Timestamp};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
