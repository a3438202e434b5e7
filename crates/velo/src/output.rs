// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal and JSON rendering shared by the subcommands.

use chrono::NaiveDateTime;
use colored::Colorize;
use serde::Serialize;
use velo_core::model::Booking;
use velo_core::BookingStatus;

use crate::error::CliError;

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}

/// `Mon 2030-01-07 09:00`
pub fn format_when(at: NaiveDateTime) -> String {
    at.format("%a %Y-%m-%d %H:%M").to_string()
}

pub fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Session type and option name, e.g. `Hitting Lesson (Single Session)`.
pub fn session_label(booking: &Booking) -> String {
    match (
        booking.session_type_name.is_empty(),
        booking.session_type_option_name.is_empty(),
    ) {
        (false, false) => format!(
            "{} ({})",
            booking.session_type_name, booking.session_type_option_name
        ),
        (false, true) => booking.session_type_name.clone(),
        (true, false) => booking.session_type_option_name.clone(),
        (true, true) => format!("option #{}", booking.session_type_option_id),
    }
}

pub fn status_label(status: BookingStatus, use_color: bool) -> String {
    let text = status.to_string();
    if !use_color {
        return text;
    }
    match status {
        BookingStatus::Confirmed => text.green().to_string(),
        BookingStatus::Unpaid => text.yellow().to_string(),
        BookingStatus::Cancelled | BookingStatus::NoShow => text.red().to_string(),
        BookingStatus::Completed => text.dimmed().to_string(),
    }
}

/// One line of the booking table, without the status column.
pub fn booking_row(booking: &Booking) -> String {
    format!(
        "{:>6}  {:<20}  {:<32}  {:<16}  {:<12}  {:>8}",
        booking.id,
        format_when(booking.scheduled_at),
        session_label(booking),
        booking.trainer_name,
        booking.player_name.as_deref().unwrap_or("-"),
        format_price(booking.price_paid),
    )
}

pub fn print_bookings(bookings: &[Booking], use_color: bool) {
    if bookings.is_empty() {
        println!("No bookings yet. Start one with: velo book");
        return;
    }
    println!(
        "{:>6}  {:<20}  {:<32}  {:<16}  {:<12}  {:>8}  STATUS",
        "ID", "WHEN", "SESSION", "TRAINER", "PLAYER", "PRICE"
    );
    for booking in bookings {
        let marker = if booking.status.is_cancellable() { " *" } else { "" };
        println!(
            "{}  {}{marker}",
            booking_row(booking),
            status_label(booking.status, use_color)
        );
    }
    if bookings.iter().any(|b| b.status.is_cancellable()) {
        println!();
        println!("* can be cancelled with: velo cancel <ID>");
    }
}

pub fn print_booking(booking: &Booking, use_color: bool) {
    println!();
    println!("  Booking #{}", booking.id);
    println!("  {}", "-".repeat(35));
    println!("    When:     {}", format_when(booking.scheduled_at));
    println!("    Session:  {}", session_label(booking));
    println!("    Length:   {} min", booking.duration_minutes);
    println!("    Trainer:  {}", booking.trainer_name);
    if let Some(player) = &booking.player_name {
        println!("    Player:   {player}");
    }
    println!("    Status:   {}", status_label(booking.status, use_color));
    println!("    Price:    {}", format_price(booking.price_paid));
    if let Some(notes) = &booking.notes {
        println!("    Notes:    {notes}");
    }
    if let Some(reason) = &booking.cancellation_reason {
        println!("    Reason:   {reason}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use velo_core::model::Booking;

    use super::*;

    fn booking() -> Booking {
        Booking {
            id: 77,
            user_id: Some(1),
            user_name: Some("Pat".into()),
            player_name: None,
            session_type_option_id: 10,
            session_type_name: "Hitting Lesson".into(),
            session_type_option_name: "Single".into(),
            trainer_id: 5,
            trainer_name: "Coach A".into(),
            scheduled_at: "2030-01-07T09:00:00".parse().unwrap(),
            duration_minutes: 60,
            status: BookingStatus::Confirmed,
            price_paid: 50.0,
            notes: None,
            cancellation_reason: None,
        }
    }

    #[test]
    fn when_includes_weekday() {
        assert_eq!(format_when(booking().scheduled_at), "Mon 2030-01-07 09:00");
    }

    #[test]
    fn price_has_two_decimals() {
        assert_eq!(format_price(50.0), "$50.00");
        assert_eq!(format_price(17.5), "$17.50");
    }

    #[test]
    fn session_label_falls_back_to_option_id() {
        let mut b = booking();
        assert_eq!(session_label(&b), "Hitting Lesson (Single)");
        b.session_type_name.clear();
        b.session_type_option_name.clear();
        assert_eq!(session_label(&b), "option #10");
    }

    #[test]
    fn row_shows_dash_without_player() {
        let row = booking_row(&booking());
        assert!(row.trim_start().starts_with("77"));
        assert!(row.contains("Coach A"));
        assert!(row.contains(" - "));
        assert!(row.ends_with("$50.00"));
    }

    #[test]
    fn plain_status_is_wire_spelling() {
        assert_eq!(status_label(BookingStatus::NoShow, false), "NO_SHOW");
    }
}
