// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::string_slice
)]

//! Unit tests for the M3DB operator
//!
//! This module contains unit tests for:
//! - Resource generators (StatefulSet, Services, ConfigMap)
//! - The status condition ledger
//! - Spec validation
//! - Custom resource parsing

#[path = "../common/mod.rs"]
mod common;

mod status;
