// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory booking backend for deterministic testing.
//!
//! `MockBookingApi` implements `BookingApi` over fixed reference data and a
//! mutable booking table, records every call, and can be told to fail the
//! next call to a given endpoint.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use velo_core::model::{
    AvailabilityWindow, Booking, CancelBookingRequest, CreateBookingRequest, Player, SessionType,
    SessionTypeOption, Trainer,
};
use velo_core::types::{BookingId, SessionTypeId, TrainerId};
use velo_core::{BookingApi, BookingStatus, VeloError};

/// Backend endpoints, used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    SessionTypes,
    SessionTypeOptions,
    Trainers,
    Availability,
    Players,
    Bookings,
    CreateBooking,
    CancelBooking,
}

/// A recorded call with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SessionTypes,
    SessionTypeOptions(SessionTypeId),
    Trainers,
    Availability(TrainerId),
    Players,
    Bookings,
    CreateBooking(CreateBookingRequest),
    CancelBooking(BookingId, CancelBookingRequest),
}

#[derive(Default)]
struct Backend {
    bookings: Vec<Booking>,
    calls: Vec<Call>,
    failures: HashMap<Endpoint, VecDeque<VeloError>>,
    next_booking_id: BookingId,
}

/// A mock backend with builder-style setup.
///
/// Created bookings get ids from 1000 upward with status `UNPAID`.
/// Cancelling a booking twice fails with a 400 like the real backend.
pub struct MockBookingApi {
    session_types: Vec<SessionType>,
    options: HashMap<SessionTypeId, Vec<SessionTypeOption>>,
    trainers: Vec<Trainer>,
    availability: HashMap<TrainerId, Vec<AvailabilityWindow>>,
    players: Vec<Player>,
    backend: Arc<Mutex<Backend>>,
}

impl MockBookingApi {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self {
            session_types: Vec::new(),
            options: HashMap::new(),
            trainers: Vec::new(),
            availability: HashMap::new(),
            players: Vec::new(),
            backend: Arc::new(Mutex::new(Backend {
                next_booking_id: 1000,
                ..Backend::default()
            })),
        }
    }

    pub fn with_session_types(mut self, session_types: Vec<SessionType>) -> Self {
        self.session_types = session_types;
        self
    }

    /// Options served by the per-session-type endpoint.
    pub fn with_options(
        mut self,
        session_type_id: SessionTypeId,
        options: Vec<SessionTypeOption>,
    ) -> Self {
        self.options.insert(session_type_id, options);
        self
    }

    pub fn with_trainers(mut self, trainers: Vec<Trainer>) -> Self {
        self.trainers = trainers;
        self
    }

    pub fn with_availability(
        mut self,
        trainer_id: TrainerId,
        windows: Vec<AvailabilityWindow>,
    ) -> Self {
        self.availability.insert(trainer_id, windows);
        self
    }

    pub fn with_players(mut self, players: Vec<Player>) -> Self {
        self.players = players;
        self
    }

    /// Seed the booking table.
    pub fn with_bookings(mut self, bookings: Vec<Booking>) -> Self {
        if let Some(backend) = Arc::get_mut(&mut self.backend) {
            backend.get_mut().bookings = bookings;
        }
        self
    }

    /// Make the next call to `endpoint` fail with `error`. Failures queue up.
    pub async fn fail_next(&self, endpoint: Endpoint, error: VeloError) {
        self.backend
            .lock()
            .await
            .failures
            .entry(endpoint)
            .or_default()
            .push_back(error);
    }

    /// Every call made so far, in order.
    pub async fn calls(&self) -> Vec<Call> {
        self.backend.lock().await.calls.clone()
    }

    /// Current booking table.
    pub async fn bookings(&self) -> Vec<Booking> {
        self.backend.lock().await.bookings.clone()
    }

    /// Record `call` and pop an injected failure for `endpoint`, if any.
    async fn record(&self, endpoint: Endpoint, call: Call) -> Result<(), VeloError> {
        let mut backend = self.backend.lock().await;
        backend.calls.push(call);
        match backend
            .failures
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front)
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn option_name(&self, option_id: i64) -> (String, String) {
        self.session_types
            .iter()
            .flat_map(|st| st.options.iter().map(move |o| (st, o)))
            .chain(self.options.values().flatten().filter_map(|o| {
                self.session_types
                    .iter()
                    .find(|st| st.id == o.session_type_id)
                    .map(|st| (st, o))
            }))
            .find(|(_, o)| o.id == option_id)
            .map(|(st, o)| (st.name.clone(), o.name.clone()))
            .unwrap_or_default()
    }
}

impl Default for MockBookingApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingApi for MockBookingApi {
    async fn session_types(&self) -> Result<Vec<SessionType>, VeloError> {
        self.record(Endpoint::SessionTypes, Call::SessionTypes).await?;
        Ok(self.session_types.clone())
    }

    async fn session_type_options(
        &self,
        session_type_id: SessionTypeId,
    ) -> Result<Vec<SessionTypeOption>, VeloError> {
        self.record(
            Endpoint::SessionTypeOptions,
            Call::SessionTypeOptions(session_type_id),
        )
        .await?;
        Ok(self
            .options
            .get(&session_type_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn trainers(&self) -> Result<Vec<Trainer>, VeloError> {
        self.record(Endpoint::Trainers, Call::Trainers).await?;
        Ok(self.trainers.clone())
    }

    async fn trainer_availability(
        &self,
        trainer_id: TrainerId,
    ) -> Result<Vec<AvailabilityWindow>, VeloError> {
        self.record(Endpoint::Availability, Call::Availability(trainer_id))
            .await?;
        Ok(self
            .availability
            .get(&trainer_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn my_players(&self) -> Result<Vec<Player>, VeloError> {
        self.record(Endpoint::Players, Call::Players).await?;
        Ok(self.players.clone())
    }

    async fn my_bookings(&self) -> Result<Vec<Booking>, VeloError> {
        self.record(Endpoint::Bookings, Call::Bookings).await?;
        Ok(self.backend.lock().await.bookings.clone())
    }

    async fn create_booking(&self, request: &CreateBookingRequest) -> Result<Booking, VeloError> {
        self.record(Endpoint::CreateBooking, Call::CreateBooking(request.clone()))
            .await?;

        let (session_type_name, session_type_option_name) =
            self.option_name(request.session_type_option_id);
        let trainer_name = self
            .trainers
            .iter()
            .find(|t| t.id == request.trainer_id)
            .map(|t| t.name.clone())
            .unwrap_or_default();
        let player_name = request
            .player_id
            .and_then(|id| self.players.iter().find(|p| p.id == id))
            .map(|p| p.name.clone());

        let mut backend = self.backend.lock().await;
        let id = backend.next_booking_id;
        backend.next_booking_id += 1;
        let booking = Booking {
            id,
            user_id: Some(1),
            user_name: None,
            player_name,
            session_type_option_id: request.session_type_option_id,
            session_type_name,
            session_type_option_name,
            trainer_id: request.trainer_id,
            trainer_name,
            scheduled_at: request.scheduled_at,
            duration_minutes: 60,
            status: BookingStatus::Unpaid,
            price_paid: 0.0,
            notes: request.notes.clone(),
            cancellation_reason: None,
        };
        backend.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn cancel_booking(
        &self,
        booking_id: BookingId,
        request: &CancelBookingRequest,
    ) -> Result<Booking, VeloError> {
        self.record(
            Endpoint::CancelBooking,
            Call::CancelBooking(booking_id, request.clone()),
        )
        .await?;

        let mut backend = self.backend.lock().await;
        let booking = backend
            .bookings
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or_else(|| VeloError::Api {
                status: 404,
                message: format!("Booking not found with id: {booking_id}"),
            })?;
        if booking.status == BookingStatus::Cancelled {
            return Err(VeloError::Api {
                status: 400,
                message: "Booking is already cancelled".to_string(),
            });
        }
        booking.status = BookingStatus::Cancelled;
        booking.cancellation_reason = request.reason.clone();
        Ok(booking.clone())
    }
}
