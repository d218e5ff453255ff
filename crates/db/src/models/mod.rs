//! Entity models and list filters.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//!   (camelCase serde renames form the wire contract)
//! - The entity's list-filter struct consumed by its repository
//!
//! Create/patch DTOs live in `manabi_core::validation`: they are the
//! output type of the validation layer.

pub mod log;
pub mod note;
pub mod theme;
