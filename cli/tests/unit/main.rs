//! Unit test harness for the stoker CLI library.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod helpers;
mod mocks;
mod property_tests;
mod provision_service;
mod worker_lifecycle;
