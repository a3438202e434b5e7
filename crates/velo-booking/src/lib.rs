// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Booking flow for the Velo client.
//!
//! - [`slots`] derives bookable half-hour start times from a trainer's weekly
//!   availability windows.
//! - [`flow`] is the booking state machine (list, session, trainer, datetime,
//!   confirm) as a pure transition function over events and command results.
//! - [`controller`] drives that state machine against a
//!   [`velo_core::BookingApi`].

pub mod controller;
pub mod draft;
pub mod error;
pub mod flow;
pub mod slots;

pub use controller::BookingFlow;
pub use draft::BookingDraft;
pub use error::{FlowError, Rejected};
pub use flow::{Command, Event, FlowState, Outcome, Payload, Phase, Step, Ticket};
pub use slots::derive_slots;
