//! Application layer — ports and services.
//!
//! Imports only from `crate::domain`; infrastructure and presentation are
//! injected through the traits in [`ports`].

pub mod ports;
pub mod services;
