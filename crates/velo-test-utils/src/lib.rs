// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Velo integration tests.
//!
//! # Components
//!
//! - [`MockBookingApi`] - In-memory backend with scripted failures and call capture
//! - [`fixtures`] - Catalog, trainer, availability and booking builders

pub mod fixtures;
pub mod mock_api;

pub use mock_api::{Call, Endpoint, MockBookingApi};
