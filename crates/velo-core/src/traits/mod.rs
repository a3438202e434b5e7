// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the booking flow and the backend.

pub mod api;

pub use api::BookingApi;
