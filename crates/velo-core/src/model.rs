// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read models and request bodies exchanged with the booking backend.
//!
//! Field names follow the backend's camelCase JSON. Read models are treated as
//! immutable snapshots; only the backend changes them.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{
    BookingId, BookingStatus, DayOfWeek, Handedness, PlayerId, PricingType, Role,
    SessionTypeId, SessionTypeOptionId, Sport, SubscriptionStatus, TrainerId, UserId,
};

/// A catalog entry for a category of training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionType {
    pub id: SessionTypeId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub duration_minutes: u32,
    pub is_active: bool,
    /// Embedded options. The backend may send `null` or omit them.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub options: Vec<SessionTypeOption>,
}

impl SessionType {
    /// Looks up an active option of this session type.
    pub fn active_option(&self, option_id: SessionTypeOptionId) -> Option<&SessionTypeOption> {
        self.options
            .iter()
            .find(|o| o.id == option_id && o.is_active)
    }
}

/// A purchasable variant of a session type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTypeOption {
    pub id: SessionTypeOptionId,
    pub session_type_id: SessionTypeId,
    #[serde(default)]
    pub session_type_name: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub pricing_type: PricingType,
    #[serde(default)]
    pub billing_period_days: Option<u32>,
    #[serde(default)]
    pub sessions_per_week: Option<u32>,
    #[serde(default)]
    pub auto_renew: Option<bool>,
    #[serde(default)]
    pub max_participants: Option<u32>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trainer {
    pub id: TrainerId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub sports: Vec<Sport>,
    pub is_active: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A recurring weekly open interval for a trainer.
///
/// Several windows may exist for the same day and they are not guaranteed to be
/// disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    pub id: i64,
    pub trainer_id: TrainerId,
    pub day_of_week: DayOfWeek,
    #[serde(with = "wall_time")]
    pub start_time: NaiveTime,
    #[serde(with = "wall_time")]
    pub end_time: NaiveTime,
    pub is_available: bool,
}

/// A dependent player managed by a parent account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub sport: Option<String>,
    #[serde(default)]
    pub bats: Option<Handedness>,
    #[serde(default)]
    pub throwing_hand: Option<Handedness>,
    #[serde(default)]
    pub independent: bool,
}

/// A booking record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub player_name: Option<String>,
    pub session_type_option_id: SessionTypeOptionId,
    #[serde(default)]
    pub session_type_name: String,
    #[serde(default)]
    pub session_type_option_name: String,
    pub trainer_id: TrainerId,
    #[serde(default)]
    pub trainer_name: String,
    #[serde(with = "local_datetime")]
    pub scheduled_at: NaiveDateTime,
    #[serde(default)]
    pub duration_minutes: u32,
    pub status: BookingStatus,
    #[serde(default)]
    pub price_paid: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: i64,
    pub player_id: PlayerId,
    #[serde(default)]
    pub player_name: String,
    pub session_type_option_id: SessionTypeOptionId,
    #[serde(default)]
    pub session_type_name: Option<String>,
    #[serde(default)]
    pub session_type_option_name: Option<String>,
    pub status: SubscriptionStatus,
    pub current_period_start: String,
    pub current_period_end: String,
    pub tokens_per_period: u32,
    pub tokens_remaining: u32,
    #[serde(default)]
    pub auto_renew: bool,
}

/// Response of a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub user_id: UserId,
}

/// Error body the backend sends with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub status: Option<u16>,
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub session_type_option_id: SessionTypeOptionId,
    pub trainer_id: TrainerId,
    /// Wall-clock local time, sent without any timezone conversion.
    #[serde(with = "local_datetime")]
    pub scheduled_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CancelBookingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// `HH:mm` wall-clock times. Accepts `HH:mm:ss` on input.
pub mod wall_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(raw, "%H:%M:%S").or_else(|_| NaiveTime::parse_from_str(raw, FORMAT))
    }

    pub fn serialize<S: Serializer>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// ISO-8601 local date-times (`YYYY-MM-DDTHH:mm:ss`), no offset.
pub mod local_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<NaiveDateTime>()
            .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M"))
            .map_err(serde::de::Error::custom)
    }
}
