// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The signed-in user, passed explicitly to the client and the booking flow.

use crate::model::AuthResponse;
use crate::types::{Role, UserId};

/// Identity and credentials of the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSession {
    pub user_id: Option<UserId>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
    /// Bearer token sent on every request. `None` means anonymous.
    pub token: Option<String>,
}

impl UserSession {
    /// An anonymous session with the given role.
    pub fn anonymous(role: Role) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    /// Whether the caller has one of the given roles.
    pub fn has_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    /// Whether the booking flow should load the caller's players.
    pub fn manages_players(&self) -> bool {
        self.role.permits_dependents()
    }
}

impl From<AuthResponse> for UserSession {
    fn from(auth: AuthResponse) -> Self {
        Self {
            user_id: Some(auth.user_id),
            name: Some(auth.name),
            email: Some(auth.email),
            role: auth.role,
            token: Some(auth.token),
        }
    }
}
