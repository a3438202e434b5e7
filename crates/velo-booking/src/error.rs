// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors raised inside the booking flow.
//!
//! [`Rejected`] is returned synchronously when an event is not allowed in the
//! current state; the state is left untouched. [`FlowError`] is the banner
//! shown after a backend call fails.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use velo_core::types::{PlayerId, SessionTypeOptionId, TrainerId};
use velo_core::VeloError;

use crate::flow::Step;

/// Why an event was ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("a request is still in flight")]
    Busy,

    #[error("not available on the {actual} step")]
    WrongStep { actual: Step },

    #[error("{0} must be chosen first")]
    Missing(&'static str),

    #[error("session type option {0} is not offered")]
    UnknownOption(SessionTypeOptionId),

    #[error("option {0} is sold as a subscription and cannot be booked directly")]
    SubscriptionOption(SessionTypeOptionId),

    #[error("trainer {0} is not available for booking")]
    UnknownTrainer(TrainerId),

    #[error("{date} is before the earliest bookable date {earliest}")]
    DateInPast { date: NaiveDate, earliest: NaiveDate },

    #[error("{} is not an open slot on the selected date", .0.format("%H:%M"))]
    SlotUnavailable(NaiveTime),

    #[error("player {0} is not one of your players")]
    UnknownPlayer(PlayerId),

    #[error("only parent accounts book on behalf of a player")]
    PlayersNotAllowed,

    #[error("cannot go back from {from} to {to}")]
    NotBehind { from: Step, to: Step },

    #[error("a cancellation is already in progress")]
    CancelInFlight,
}

/// A failed backend call, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FlowError {
    pub message: String,
    /// Whether trying the same action again may succeed.
    pub retryable: bool,
}

impl FlowError {
    /// A failed entry fetch, prefixed with what was being loaded.
    pub fn fetch(what: &str, err: &VeloError) -> Self {
        Self {
            message: format!("could not load {what}: {err}"),
            retryable: err.is_retryable(),
        }
    }

    /// A rejected write; the backend's message is kept verbatim.
    pub fn from_server(err: &VeloError) -> Self {
        Self {
            message: err.to_string(),
            retryable: err.is_retryable(),
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
        }
    }
}
