// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `velo book` and `velo slots`.
//!
//! `book` walks the booking flow through the same steps a UI would: start,
//! pick the option, pick the trainer, pick date and time, review, submit.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use clap::Args;
use tracing::debug;
use velo_booking::slots::{availability_days, format_slot};
use velo_booking::{derive_slots, BookingFlow, Event, Rejected};
use velo_client::ApiClient;
use velo_core::model::wall_time;
use velo_core::types::{PlayerId, SessionTypeOptionId, TrainerId};
use velo_core::{BookingApi, DayOfWeek, UserSession, VeloError};

use crate::error::CliError;
use crate::output;

#[derive(Args, Debug)]
pub struct BookArgs {
    /// Session type option to book.
    #[arg(long = "option")]
    pub option_id: SessionTypeOptionId,

    #[arg(long = "trainer")]
    pub trainer_id: TrainerId,

    /// Date as YYYY-MM-DD.
    #[arg(long, value_parser = parse_date)]
    pub date: NaiveDate,

    /// Start time as HH:MM; see `velo slots` for the open ones.
    #[arg(long, value_parser = parse_time)]
    pub time: NaiveTime,

    /// Book for one of your players (parent accounts).
    #[arg(long = "player")]
    pub player_id: Option<PlayerId>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long)]
    pub json: bool,
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, VeloError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| VeloError::InvalidInput(format!("`{raw}` is not a YYYY-MM-DD date ({e})")))
}

pub fn parse_time(raw: &str) -> Result<NaiveTime, VeloError> {
    wall_time::parse(raw)
        .map_err(|e| VeloError::InvalidInput(format!("`{raw}` is not an HH:MM time ({e})")))
}

/// Send `event` and surface a backend failure recorded by the flow.
pub(crate) async fn drive(flow: &mut BookingFlow, event: Event) -> Result<(), CliError> {
    flow.send(event).await?;
    debug!(step = %flow.state().step(), "flow settled");
    match flow.state().error() {
        Some(err) => Err(err.clone().into()),
        None => Ok(()),
    }
}

pub async fn run_book(
    client: ApiClient,
    session: &UserSession,
    args: BookArgs,
    use_color: bool,
) -> Result<(), CliError> {
    let mut flow = BookingFlow::new(Arc::new(client), session);

    drive(&mut flow, Event::StartBooking).await?;
    let session_type_id = flow
        .state()
        .session_types()
        .iter()
        .find(|st| st.options.iter().any(|o| o.id == args.option_id))
        .map(|st| st.id)
        .ok_or(Rejected::UnknownOption(args.option_id))?;
    drive(
        &mut flow,
        Event::SelectOption {
            session_type_id,
            option_id: args.option_id,
        },
    )
    .await?;

    drive(&mut flow, Event::SelectTrainer(args.trainer_id)).await?;
    drive(&mut flow, Event::SelectDate(args.date)).await?;

    let slots = flow.state().slots();
    if slots.is_empty() {
        let days = flow.state().available_days();
        let works_on = if days.is_empty() {
            "no days".to_string()
        } else {
            days.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        };
        return Err(CliError::Usage(format!(
            "trainer {} has no open slots on {} ({}); they work on {works_on}",
            args.trainer_id,
            args.date,
            DayOfWeek::of(args.date)
        )));
    }
    if !slots.contains(&args.time) {
        return Err(CliError::Usage(format!(
            "{} is not an open slot; choose one of: {}",
            format_slot(args.time),
            join_slots(&slots)
        )));
    }
    drive(&mut flow, Event::SelectTime(args.time)).await?;

    if args.player_id.is_some() {
        drive(&mut flow, Event::SelectPlayer(args.player_id)).await?;
    }
    if let Some(notes) = args.notes {
        drive(&mut flow, Event::SetNotes(notes)).await?;
    }
    drive(&mut flow, Event::Continue).await?;

    // Submitting also reloads the list; a failed reload must not hide the
    // booking that was created.
    flow.send(Event::Submit).await?;
    let state = flow.state();
    match state.last_booking() {
        Some(booking) => {
            if args.json {
                output::print_json(booking)?;
            } else {
                println!("Booked.");
                output::print_booking(booking, use_color);
            }
            if let Some(err) = state.error() {
                eprintln!("velo: warning: {err}");
            }
            Ok(())
        }
        None => Err(state
            .error()
            .cloned()
            .map(CliError::from)
            .unwrap_or_else(|| CliError::Usage("booking was not created".to_string()))),
    }
}

pub async fn run_slots(
    client: &ApiClient,
    trainer_id: TrainerId,
    date: NaiveDate,
    json: bool,
) -> Result<(), CliError> {
    let windows: Vec<_> = client
        .trainer_availability(trainer_id)
        .await?
        .into_iter()
        .filter(|w| w.is_available)
        .collect();
    let slots = derive_slots(&windows, date);

    if json {
        let rendered: Vec<String> = slots.iter().copied().map(format_slot).collect();
        return output::print_json(&rendered);
    }

    let days = availability_days(&windows);
    if days.is_empty() {
        println!("Trainer {trainer_id} has no weekly availability.");
        return Ok(());
    }
    let days: Vec<String> = days.iter().map(ToString::to_string).collect();
    println!("Trainer {trainer_id} works on: {}", days.join(", "));
    if slots.is_empty() {
        println!("No availability on {date} ({}).", DayOfWeek::of(date));
    } else {
        println!("Open slots on {date}: {}", join_slots(&slots));
    }
    Ok(())
}

fn join_slots(slots: &[NaiveTime]) -> String {
    slots
        .iter()
        .copied()
        .map(format_slot)
        .collect::<Vec<_>>()
        .join(", ")
}
