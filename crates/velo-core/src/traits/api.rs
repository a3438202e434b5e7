// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend API trait consumed by the booking flow.

use async_trait::async_trait;

use crate::error::VeloError;
use crate::model::{
    AvailabilityWindow, Booking, CancelBookingRequest, CreateBookingRequest, Player,
    SessionType, SessionTypeOption, Trainer,
};
use crate::types::{BookingId, SessionTypeId, TrainerId};

/// The slice of the booking backend the flow controller depends on.
///
/// The backend is authoritative for everything behind this trait: availability,
/// conflicts, pricing and booking state. Implementations are the HTTP client and
/// the scripted mock used in tests.
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// All session types, active or not. Options may or may not be embedded.
    async fn session_types(&self) -> Result<Vec<SessionType>, VeloError>;

    /// Options of one session type.
    async fn session_type_options(
        &self,
        session_type_id: SessionTypeId,
    ) -> Result<Vec<SessionTypeOption>, VeloError>;

    /// All trainers, active or not.
    async fn trainers(&self) -> Result<Vec<Trainer>, VeloError>;

    /// Weekly availability windows of a trainer, including disabled ones.
    async fn trainer_availability(
        &self,
        trainer_id: TrainerId,
    ) -> Result<Vec<AvailabilityWindow>, VeloError>;

    /// Players managed by the caller. Only meaningful for parent accounts.
    async fn my_players(&self) -> Result<Vec<Player>, VeloError>;

    /// The caller's bookings.
    async fn my_bookings(&self) -> Result<Vec<Booking>, VeloError>;

    async fn create_booking(&self, request: &CreateBookingRequest) -> Result<Booking, VeloError>;

    async fn cancel_booking(
        &self,
        booking_id: BookingId,
        request: &CancelBookingRequest,
    ) -> Result<Booking, VeloError>;
}
