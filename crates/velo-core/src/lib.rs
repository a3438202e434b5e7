// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Velo booking client.
//!
//! This crate provides the error type, the backend read models and request
//! bodies, the shared enums, the explicit user session, and the [`BookingApi`]
//! trait that separates the booking flow from the HTTP client.

pub mod error;
pub mod model;
pub mod session;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::VeloError;
pub use session::UserSession;
pub use traits::BookingApi;
pub use types::{BookingStatus, DayOfWeek, PricingType, Role};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AuthResponse;

    #[test]
    fn session_from_auth_response() {
        let session = UserSession::from(AuthResponse {
            token: "jwt".into(),
            email: "pat@example.com".into(),
            name: "Pat".into(),
            role: Role::Parent,
            user_id: 42,
        });
        assert_eq!(session.user_id, Some(42));
        assert_eq!(session.token.as_deref(), Some("jwt"));
        assert!(session.manages_players());
        assert!(session.has_role(&[Role::Admin, Role::Parent]));
        assert!(!session.has_role(&[Role::Trainer]));
    }

    #[test]
    fn anonymous_session_has_no_token() {
        let session = UserSession::anonymous(Role::Player);
        assert!(session.token.is_none());
        assert!(!session.manages_players());
    }

    #[test]
    fn booking_api_is_object_safe() {
        fn _assert_dyn(_api: &dyn BookingApi) {}
    }
}
