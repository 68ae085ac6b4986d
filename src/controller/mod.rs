pub mod error;
pub mod status;
pub mod validation;

pub use error::{Error, Result};
pub use status::{condition_types, spec_changed};
pub use validation::{duplicate_isolation_groups, validate_spec};
