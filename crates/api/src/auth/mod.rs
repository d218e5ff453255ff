//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation and validation for the
//!   real-token strategy. The mock strategy lives entirely in
//!   [`crate::config::AuthConfig`] and the request extractor.

pub mod jwt;
