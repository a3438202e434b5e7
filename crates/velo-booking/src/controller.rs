// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs the booking state machine against a [`BookingApi`].
//!
//! [`BookingFlow::send`] applies an event and drives any resulting commands
//! to completion. Callers that need to interleave backend responses (a UI
//! event loop, or tests) use [`BookingFlow::dispatch`], [`BookingFlow::execute`]
//! and [`BookingFlow::resolve`] separately.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use futures::future::join_all;
use tracing::{debug, warn};
use velo_core::model::SessionType;
use velo_core::types::BookingId;
use velo_core::{BookingApi, UserSession, VeloError};

use crate::error::{FlowError, Rejected};
use crate::flow::{Command, Event, FlowState, Outcome, Payload};

/// A booking flow bound to a backend.
pub struct BookingFlow {
    api: Arc<dyn BookingApi>,
    state: FlowState,
}

impl BookingFlow {
    /// Creates a flow for `session`. The earliest bookable date is today.
    pub fn new(api: Arc<dyn BookingApi>, session: &UserSession) -> Self {
        Self {
            api,
            state: FlowState::new(session, Local::now().date_naive()),
        }
    }

    /// Overrides the earliest bookable date.
    pub fn with_min_date(mut self, date: NaiveDate) -> Self {
        self.state.set_min_date(date);
        self
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Applies an event without running the resulting command.
    pub fn dispatch(&mut self, event: Event) -> Result<Option<Command>, Rejected> {
        self.state.apply(event)
    }

    /// Runs one command against the backend.
    pub async fn execute(&self, command: Command) -> Outcome {
        execute(self.api.as_ref(), command).await
    }

    /// Applies a command result; may return a follow-up command.
    pub fn resolve(&mut self, outcome: Outcome) -> Option<Command> {
        self.state.resolve(outcome)
    }

    /// Applies an event and runs commands until the flow settles.
    ///
    /// Backend failures do not surface here; they end up in
    /// [`FlowState::error`].
    pub async fn send(&mut self, event: Event) -> Result<(), Rejected> {
        let mut next = self.dispatch(event)?;
        while let Some(command) = next {
            let outcome = self.execute(command).await;
            next = self.resolve(outcome);
        }
        Ok(())
    }

    /// Loads the booking list.
    pub async fn open(&mut self) -> Result<(), Rejected> {
        self.send(Event::Refresh).await
    }

    /// Cancels an existing booking and refreshes the list when shown.
    pub async fn cancel_booking(
        &mut self,
        booking_id: BookingId,
        reason: Option<String>,
    ) -> Result<(), Rejected> {
        self.send(Event::CancelBooking { booking_id, reason }).await
    }
}

/// Runs `command` against `api` and tags the result with its ticket.
pub async fn execute(api: &dyn BookingApi, command: Command) -> Outcome {
    let ticket = command.ticket();
    debug!(?command, "executing");
    let result = match command {
        Command::LoadBookings { .. } => api
            .my_bookings()
            .await
            .map(Payload::Bookings)
            .map_err(|e| FlowError::fetch("bookings", &e)),
        Command::LoadCatalog {
            include_players, ..
        } => load_catalog(api, include_players)
            .await
            .map_err(|e| FlowError::fetch("session types", &e)),
        Command::LoadTrainers { .. } => api
            .trainers()
            .await
            .map(Payload::Trainers)
            .map_err(|e| FlowError::fetch("trainers", &e)),
        Command::LoadAvailability { trainer_id, .. } => api
            .trainer_availability(trainer_id)
            .await
            .map(|windows| Payload::Availability {
                trainer_id,
                windows,
            })
            .map_err(|e| FlowError::fetch("availability", &e)),
        Command::CreateBooking { request, .. } => api
            .create_booking(&request)
            .await
            .map(Payload::Created)
            .map_err(|e| FlowError::from_server(&e)),
        Command::CancelBooking {
            booking_id,
            request,
            ..
        } => api
            .cancel_booking(booking_id, &request)
            .await
            .map(Payload::Cancelled)
            .map_err(|e| FlowError::from_server(&e)),
    };
    Outcome { ticket, result }
}

async fn load_catalog(api: &dyn BookingApi, include_players: bool) -> Result<Payload, VeloError> {
    let players = async {
        if include_players {
            api.my_players().await
        } else {
            Ok(Vec::new())
        }
    };
    let (session_types, players) = futures::try_join!(api.session_types(), players)?;

    let session_types = join_all(
        session_types
            .into_iter()
            .filter(|st| st.is_active)
            .map(|st| with_options(api, st)),
    )
    .await;

    Ok(Payload::Catalog {
        session_types,
        players,
    })
}

/// Fills in options the session type listing left out.
///
/// A failure leaves that session type without options.
async fn with_options(api: &dyn BookingApi, mut session_type: SessionType) -> SessionType {
    if session_type.options.is_empty() {
        match api.session_type_options(session_type.id).await {
            Ok(options) => session_type.options = options,
            Err(e) => warn!(
                session_type_id = session_type.id,
                error = %e,
                "failed to load session type options"
            ),
        }
    }
    session_type
}
