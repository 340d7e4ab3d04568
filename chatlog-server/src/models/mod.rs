//! Domain models with validation at construction
//!
//! Request input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod session;
pub mod entry;

pub use validation::{reject_nul, ValidationError};
pub use session::{SessionId, LEGACY_DEFAULT_SESSION_ID};
pub use entry::ChatEntry;
