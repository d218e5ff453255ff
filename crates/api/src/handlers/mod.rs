//! Request handlers, one module per resource.

pub mod logs;
pub mod notes;
pub mod themes;
