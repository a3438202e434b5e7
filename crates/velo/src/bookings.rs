// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `velo bookings`, `velo show` and `velo cancel`.

use std::sync::Arc;

use velo_booking::BookingFlow;
use velo_client::ApiClient;
use velo_core::types::BookingId;
use velo_core::UserSession;

use crate::book::drive;
use crate::error::CliError;
use crate::output;

pub async fn run_list(
    client: ApiClient,
    session: &UserSession,
    upcoming: bool,
    json: bool,
    use_color: bool,
) -> Result<(), CliError> {
    let bookings = if upcoming {
        client.my_upcoming_bookings().await?
    } else {
        let mut flow = BookingFlow::new(Arc::new(client), session);
        drive(&mut flow, velo_booking::Event::Refresh).await?;
        flow.state().bookings().to_vec()
    };

    if json {
        output::print_json(&bookings)
    } else {
        output::print_bookings(&bookings, use_color);
        Ok(())
    }
}

pub async fn run_show(
    client: &ApiClient,
    id: BookingId,
    json: bool,
    use_color: bool,
) -> Result<(), CliError> {
    let booking = client.booking(id).await?;
    if json {
        output::print_json(&booking)
    } else {
        output::print_booking(&booking, use_color);
        Ok(())
    }
}

/// Cancels through the flow so the list is refreshed the same way a UI does.
pub async fn run_cancel(
    client: ApiClient,
    session: &UserSession,
    id: BookingId,
    reason: Option<String>,
    use_color: bool,
) -> Result<(), CliError> {
    let mut flow = BookingFlow::new(Arc::new(client), session);
    flow.cancel_booking(id, reason).await?;
    if let Some(err) = flow.state().error() {
        return Err(err.clone().into());
    }

    match flow.state().bookings().iter().find(|b| b.id == id) {
        Some(booking) => output::print_booking(booking, use_color),
        None => println!("Booking #{id} cancelled."),
    }
    Ok(())
}
