// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Endpoint methods of the booking backend.

use async_trait::async_trait;
use reqwest::Method;
use tracing::info;
use velo_core::model::{
    AuthResponse, AvailabilityWindow, Booking, CancelBookingRequest, CreateBookingRequest,
    LoginRequest, Player, SessionType, SessionTypeOption, Subscription, Trainer,
};
use velo_core::types::{BookingId, SessionTypeId, TrainerId};
use velo_core::{BookingApi, VeloError};

use crate::client::ApiClient;

impl ApiClient {
    /// `POST /auth/login`. The returned token is not stored anywhere.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, VeloError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self.send(Method::POST, "/auth/login", &request).await?;
        info!(user_id = auth.user_id, role = %auth.role, "logged in");
        Ok(auth)
    }

    /// `GET /bookings/me/upcoming`.
    pub async fn my_upcoming_bookings(&self) -> Result<Vec<Booking>, VeloError> {
        self.get("/bookings/me/upcoming").await
    }

    /// `GET /bookings/{id}`.
    pub async fn booking(&self, booking_id: BookingId) -> Result<Booking, VeloError> {
        self.get(&format!("/bookings/{booking_id}")).await
    }

    /// `GET /subscriptions/me`.
    pub async fn my_subscriptions(&self) -> Result<Vec<Subscription>, VeloError> {
        self.get("/subscriptions/me").await
    }
}

#[async_trait]
impl BookingApi for ApiClient {
    async fn session_types(&self) -> Result<Vec<SessionType>, VeloError> {
        self.get("/session-types").await
    }

    async fn session_type_options(
        &self,
        session_type_id: SessionTypeId,
    ) -> Result<Vec<SessionTypeOption>, VeloError> {
        self.get(&format!("/session-types/{session_type_id}/options"))
            .await
    }

    async fn trainers(&self) -> Result<Vec<Trainer>, VeloError> {
        self.get("/trainers").await
    }

    async fn trainer_availability(
        &self,
        trainer_id: TrainerId,
    ) -> Result<Vec<AvailabilityWindow>, VeloError> {
        self.get(&format!("/trainers/{trainer_id}/availability"))
            .await
    }

    async fn my_players(&self) -> Result<Vec<Player>, VeloError> {
        self.get("/players").await
    }

    async fn my_bookings(&self) -> Result<Vec<Booking>, VeloError> {
        self.get("/bookings/me").await
    }

    async fn create_booking(&self, request: &CreateBookingRequest) -> Result<Booking, VeloError> {
        let booking: Booking = self.send(Method::POST, "/bookings", request).await?;
        info!(booking_id = booking.id, scheduled_at = %booking.scheduled_at, "booking created");
        Ok(booking)
    }

    async fn cancel_booking(
        &self,
        booking_id: BookingId,
        request: &CancelBookingRequest,
    ) -> Result<Booking, VeloError> {
        let booking: Booking = self
            .send(
                Method::PUT,
                &format!("/bookings/{booking_id}/cancel"),
                request,
            )
            .await?;
        info!(booking_id, "booking cancelled");
        Ok(booking)
    }
}
