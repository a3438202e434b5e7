// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for backend read models used across tests.
//!
//! These panic on malformed literals; they are only meant for test code.

use chrono::{NaiveDate, NaiveDateTime};
use velo_core::model::{
    wall_time, AvailabilityWindow, Booking, Player, SessionType, SessionTypeOption, Trainer,
};
use velo_core::types::{
    BookingId, PlayerId, SessionTypeId, SessionTypeOptionId, Sport, TrainerId,
};
use velo_core::{BookingStatus, DayOfWeek, PricingType};

/// 2030-01-07, a Monday.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 7).expect("valid date")
}

pub fn session_type(
    id: SessionTypeId,
    name: &str,
    options: Vec<SessionTypeOption>,
) -> SessionType {
    SessionType {
        id,
        name: name.to_string(),
        description: None,
        duration_minutes: 60,
        is_active: true,
        options,
    }
}

pub fn one_time_option(id: SessionTypeOptionId, session_type_id: SessionTypeId) -> SessionTypeOption {
    SessionTypeOption {
        id,
        session_type_id,
        session_type_name: None,
        name: "Single Session".to_string(),
        description: None,
        price: 50.0,
        pricing_type: PricingType::OneTime,
        billing_period_days: None,
        sessions_per_week: None,
        auto_renew: None,
        max_participants: Some(1),
        is_active: true,
    }
}

pub fn subscription_option(
    id: SessionTypeOptionId,
    session_type_id: SessionTypeId,
) -> SessionTypeOption {
    SessionTypeOption {
        name: "Monthly".to_string(),
        price: 180.0,
        pricing_type: PricingType::Subscription,
        billing_period_days: Some(30),
        sessions_per_week: Some(1),
        auto_renew: Some(true),
        ..one_time_option(id, session_type_id)
    }
}

/// Session type 1 "Hitting Lesson" with one-time option 10 at $50.
pub fn hitting_lesson() -> SessionType {
    session_type(1, "Hitting Lesson", vec![one_time_option(10, 1)])
}

pub fn trainer(id: TrainerId, name: &str) -> Trainer {
    Trainer {
        id,
        user_id: None,
        name: name.to_string(),
        bio: None,
        sports: vec![Sport::Baseball],
        is_active: true,
        image_url: None,
    }
}

/// An enabled window; times are `HH:mm`.
pub fn window(trainer_id: TrainerId, day: DayOfWeek, start: &str, end: &str) -> AvailabilityWindow {
    AvailabilityWindow {
        id: trainer_id * 100,
        trainer_id,
        day_of_week: day,
        start_time: wall_time::parse(start).expect("valid start time"),
        end_time: wall_time::parse(end).expect("valid end time"),
        is_available: true,
    }
}

pub fn player(id: PlayerId, name: &str) -> Player {
    Player {
        id,
        name: name.to_string(),
        age: Some(12),
        position: None,
        sport: Some("BASEBALL".to_string()),
        bats: None,
        throwing_hand: None,
        independent: false,
    }
}

/// A booking with option 10 and trainer 5; `scheduled_at` is `YYYY-MM-DDTHH:mm:ss`.
pub fn booking(id: BookingId, scheduled_at: &str, status: BookingStatus) -> Booking {
    Booking {
        id,
        user_id: Some(1),
        user_name: Some("Pat".to_string()),
        player_name: None,
        session_type_option_id: 10,
        session_type_name: "Hitting Lesson".to_string(),
        session_type_option_name: "Single Session".to_string(),
        trainer_id: 5,
        trainer_name: "Coach A".to_string(),
        scheduled_at: scheduled_at
            .parse::<NaiveDateTime>()
            .expect("valid scheduled_at"),
        duration_minutes: 60,
        status,
        price_paid: 50.0,
        notes: None,
        cancellation_reason: None,
    }
}
