// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Velo booking backend.
//!
//! [`ApiClient`] implements [`velo_core::BookingApi`] over the REST API and adds
//! the read-only endpoints the CLI uses directly (upcoming bookings, a single
//! booking, subscriptions) plus login.

mod api;
pub mod client;

pub use client::ApiClient;
