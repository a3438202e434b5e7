// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The booking flow as a plain state machine.
//!
//! [`FlowState::apply`] takes a user [`Event`] and either rejects it, leaving
//! the state unchanged, or moves to the next [`Phase`] and possibly returns a
//! [`Command`] for the caller to run against the backend. The result of that
//! command comes back through [`FlowState::resolve`] as an [`Outcome`] tagged
//! with the [`Ticket`] it was issued under. Outcomes whose ticket no longer
//! matches the pending phase are dropped.
//!
//! Nothing in this module performs I/O.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info, warn};
use velo_core::model::{
    AvailabilityWindow, Booking, CancelBookingRequest, CreateBookingRequest, Player, SessionType,
    SessionTypeOption, Trainer,
};
use velo_core::types::{BookingId, PlayerId, SessionTypeId, SessionTypeOptionId, TrainerId};
use velo_core::{DayOfWeek, PricingType, UserSession};

use crate::draft::BookingDraft;
use crate::error::{FlowError, Rejected};
use crate::slots;

/// The five screens of the booking flow, in forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    /// The user's existing bookings.
    List,
    /// Choosing a session type option.
    Session,
    /// Choosing a trainer.
    Trainer,
    /// Choosing a date and a slot.
    DateTime,
    /// Reviewing the draft before submitting.
    Confirm,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::List => write!(f, "list"),
            Step::Session => write!(f, "session"),
            Step::Trainer => write!(f, "trainer"),
            Step::DateTime => write!(f, "datetime"),
            Step::Confirm => write!(f, "confirm"),
        }
    }
}

/// Identifies one issued command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the flow is, including whether it waits on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Showing `Step`; nothing in flight.
    Ready(Step),
    /// Entering `target`. On failure the flow returns to `origin`.
    Loading {
        origin: Step,
        target: Step,
        ticket: Ticket,
    },
    /// Create-booking request in flight from the confirm step.
    Submitting { ticket: Ticket },
}

impl Phase {
    /// The step being shown or entered.
    pub fn step(self) -> Step {
        match self {
            Phase::Ready(step) => step,
            Phase::Loading { target, .. } => target,
            Phase::Submitting { .. } => Step::Confirm,
        }
    }

    pub fn is_busy(self) -> bool {
        !matches!(self, Phase::Ready(_))
    }

    fn ticket(self) -> Option<Ticket> {
        match self {
            Phase::Ready(_) => None,
            Phase::Loading { ticket, .. } | Phase::Submitting { ticket } => Some(ticket),
        }
    }

    fn fallback(self) -> Step {
        match self {
            Phase::Ready(step) => step,
            Phase::Loading { origin, .. } => origin,
            Phase::Submitting { .. } => Step::Confirm,
        }
    }
}

/// User intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Reload the booking list.
    Refresh,
    /// Begin a new booking with an empty draft.
    StartBooking,
    /// Begin a new booking with an option preselected once the catalog loads.
    StartWithOption(SessionTypeOptionId),
    /// Choose an option and move on to trainers.
    SelectOption {
        session_type_id: SessionTypeId,
        option_id: SessionTypeOptionId,
    },
    /// Choose a trainer and move on to date and time.
    SelectTrainer(TrainerId),
    SelectDate(NaiveDate),
    SelectTime(NaiveTime),
    /// Book for one of the caller's players, or for the caller with `None`.
    SelectPlayer(Option<PlayerId>),
    SetNotes(String),
    /// Move forward keeping the current selection.
    Continue,
    /// Return to an earlier step. `Back(Step::List)` abandons the draft.
    Back(Step),
    Submit,
    /// Cancel an existing booking. Independent of the current step.
    CancelBooking {
        booking_id: BookingId,
        reason: Option<String>,
    },
}

/// Backend work requested by the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadBookings {
        ticket: Ticket,
    },
    /// Active session types with their options, plus the caller's players
    /// when `include_players` is set.
    LoadCatalog {
        ticket: Ticket,
        include_players: bool,
    },
    LoadTrainers {
        ticket: Ticket,
    },
    LoadAvailability {
        ticket: Ticket,
        trainer_id: TrainerId,
    },
    CreateBooking {
        ticket: Ticket,
        request: CreateBookingRequest,
    },
    CancelBooking {
        ticket: Ticket,
        booking_id: BookingId,
        request: CancelBookingRequest,
    },
}

impl Command {
    pub fn ticket(&self) -> Ticket {
        match self {
            Command::LoadBookings { ticket }
            | Command::LoadCatalog { ticket, .. }
            | Command::LoadTrainers { ticket }
            | Command::LoadAvailability { ticket, .. }
            | Command::CreateBooking { ticket, .. }
            | Command::CancelBooking { ticket, .. } => *ticket,
        }
    }
}

/// Data returned by a successful command.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Bookings(Vec<Booking>),
    Catalog {
        session_types: Vec<SessionType>,
        players: Vec<Player>,
    },
    Trainers(Vec<Trainer>),
    Availability {
        trainer_id: TrainerId,
        windows: Vec<AvailabilityWindow>,
    },
    Created(Booking),
    Cancelled(Booking),
}

/// The result of a [`Command`], tagged with its ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub ticket: Ticket,
    pub result: Result<Payload, FlowError>,
}

#[derive(Debug, Clone, PartialEq)]
struct Availability {
    trainer_id: TrainerId,
    windows: Vec<AvailabilityWindow>,
}

/// Full state of one booking flow instance.
#[derive(Debug, Clone)]
pub struct FlowState {
    phase: Phase,
    draft: BookingDraft,
    manages_players: bool,
    min_date: NaiveDate,
    bookings: Vec<Booking>,
    session_types: Vec<SessionType>,
    players: Vec<Player>,
    trainers: Vec<Trainer>,
    availability: Option<Availability>,
    pending_option: Option<SessionTypeOptionId>,
    cancelling: Option<Ticket>,
    last_booking: Option<Booking>,
    error: Option<FlowError>,
    next_ticket: u64,
}

impl FlowState {
    /// A flow on the list step. Dates before `min_date` cannot be selected.
    pub fn new(session: &UserSession, min_date: NaiveDate) -> Self {
        Self {
            phase: Phase::Ready(Step::List),
            draft: BookingDraft::default(),
            manages_players: session.manages_players(),
            min_date,
            bookings: Vec::new(),
            session_types: Vec::new(),
            players: Vec::new(),
            trainers: Vec::new(),
            availability: None,
            pending_option: None,
            cancelling: None,
            last_booking: None,
            error: None,
            next_ticket: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn step(&self) -> Step {
        self.phase.step()
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    pub(crate) fn set_min_date(&mut self, date: NaiveDate) {
        self.min_date = date;
    }

    /// The caller's bookings, newest first.
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Active session types offered on the session step.
    pub fn session_types(&self) -> &[SessionType] {
        &self.session_types
    }

    /// The caller's players. Empty unless the role manages dependents.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Active trainers offered on the trainer step.
    pub fn trainers(&self) -> &[Trainer] {
        &self.trainers
    }

    /// Enabled availability windows of the selected trainer.
    pub fn windows(&self) -> &[AvailabilityWindow] {
        match (&self.availability, self.draft.trainer()) {
            (Some(a), Some(t)) if a.trainer_id == t.id => &a.windows,
            _ => &[],
        }
    }

    /// Days on which the selected trainer has any availability.
    pub fn available_days(&self) -> Vec<DayOfWeek> {
        slots::availability_days(self.windows())
    }

    /// Bookable start times on the selected date.
    ///
    /// Empty while availability is loading or before a date is chosen.
    pub fn slots(&self) -> Vec<NaiveTime> {
        let shows_slots = matches!(
            self.phase,
            Phase::Ready(Step::DateTime | Step::Confirm) | Phase::Submitting { .. }
        );
        match self.draft.date() {
            Some(date) if shows_slots => slots::derive_slots(self.windows(), date),
            _ => Vec::new(),
        }
    }

    /// The banner for the last failed backend call, if any.
    pub fn error(&self) -> Option<&FlowError> {
        self.error.as_ref()
    }

    /// The booking created by the last successful submit.
    pub fn last_booking(&self) -> Option<&Booking> {
        self.last_booking.as_ref()
    }

    pub fn is_cancelling(&self) -> bool {
        self.cancelling.is_some()
    }

    /// True when [`Event::Submit`] would be accepted.
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Ready(Step::Confirm) && self.draft.is_complete()
    }

    /// Applies a user event.
    ///
    /// On `Err` nothing changed. An accepted event clears the error banner.
    pub fn apply(&mut self, event: Event) -> Result<Option<Command>, Rejected> {
        let command = match event {
            Event::Refresh => {
                self.ready_in(&[Step::List])?;
                Some(Command::LoadBookings {
                    ticket: self.begin(Step::List, Step::List),
                })
            }
            Event::StartBooking => self.start(None)?,
            Event::StartWithOption(option_id) => self.start(Some(option_id))?,
            Event::SelectOption {
                session_type_id,
                option_id,
            } => {
                self.ready_in(&[Step::Session])?;
                let (session_type, option) = self.find_option(Some(session_type_id), option_id)?;
                self.draft.select_option(session_type, option);
                if self.draft.trainer().is_none() {
                    self.availability = None;
                }
                Some(self.enter_trainer())
            }
            Event::SelectTrainer(trainer_id) => {
                self.ready_in(&[Step::Trainer])?;
                let trainer = self
                    .trainers
                    .iter()
                    .find(|t| t.id == trainer_id && t.is_active)
                    .cloned()
                    .ok_or(Rejected::UnknownTrainer(trainer_id))?;
                self.draft.select_trainer(trainer);
                self.enter_datetime(trainer_id)
            }
            Event::SelectDate(date) => {
                self.ready_in(&[Step::DateTime])?;
                if date < self.min_date {
                    return Err(Rejected::DateInPast {
                        date,
                        earliest: self.min_date,
                    });
                }
                self.draft.select_date(date);
                None
            }
            Event::SelectTime(time) => {
                self.ready_in(&[Step::DateTime])?;
                if self.draft.date().is_none() {
                    return Err(Rejected::Missing("a date"));
                }
                if !self.slots().contains(&time) {
                    return Err(Rejected::SlotUnavailable(time));
                }
                self.draft.select_time(time);
                None
            }
            Event::SelectPlayer(player_id) => {
                self.ready_in(&[Step::DateTime, Step::Confirm])?;
                if let Some(id) = player_id {
                    if !self.manages_players {
                        return Err(Rejected::PlayersNotAllowed);
                    }
                    if !self.players.iter().any(|p| p.id == id) {
                        return Err(Rejected::UnknownPlayer(id));
                    }
                }
                self.draft.select_player(player_id);
                None
            }
            Event::SetNotes(notes) => {
                self.ready_in(&[Step::DateTime, Step::Confirm])?;
                self.draft.set_notes(notes);
                None
            }
            Event::Continue => self.advance()?,
            Event::Back(to) => {
                self.back(to)?;
                None
            }
            Event::Submit => {
                self.ready_in(&[Step::Confirm])?;
                let request = self
                    .draft
                    .to_request()
                    .ok_or(Rejected::Missing("a date and time"))?;
                let ticket = self.issue();
                self.phase = Phase::Submitting { ticket };
                Some(Command::CreateBooking { ticket, request })
            }
            Event::CancelBooking { booking_id, reason } => {
                if self.cancelling.is_some() {
                    return Err(Rejected::CancelInFlight);
                }
                let ticket = self.issue();
                self.cancelling = Some(ticket);
                let reason = reason
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty());
                Some(Command::CancelBooking {
                    ticket,
                    booking_id,
                    request: CancelBookingRequest { reason },
                })
            }
        };
        self.error = None;
        Ok(command)
    }

    /// Applies the result of a previously issued command.
    pub fn resolve(&mut self, outcome: Outcome) -> Option<Command> {
        if self.cancelling == Some(outcome.ticket) {
            self.cancelling = None;
            return self.finish_cancel(outcome.result);
        }

        if self.phase.ticket() != Some(outcome.ticket) {
            debug!(ticket = %outcome.ticket, step = %self.step(), "dropping stale response");
            return None;
        }

        let phase = self.phase;
        let payload = match outcome.result {
            Ok(payload) => payload,
            Err(error) => {
                warn!(step = %phase.step(), error = %error, "backend call failed");
                self.phase = Phase::Ready(phase.fallback());
                self.error = Some(error);
                return None;
            }
        };

        match (phase, payload) {
            (
                Phase::Loading {
                    target: Step::List, ..
                },
                Payload::Bookings(bookings),
            ) => {
                self.set_bookings(bookings);
                self.phase = Phase::Ready(Step::List);
                None
            }
            (
                Phase::Loading {
                    target: Step::Session,
                    ..
                },
                Payload::Catalog {
                    session_types,
                    players,
                },
            ) => {
                self.session_types = session_types.into_iter().filter(|st| st.is_active).collect();
                self.players = if self.manages_players {
                    players
                } else {
                    Vec::new()
                };
                self.phase = Phase::Ready(Step::Session);
                self.follow_deep_link()
            }
            (
                Phase::Loading {
                    target: Step::Trainer,
                    ..
                },
                Payload::Trainers(trainers),
            ) => {
                self.trainers = trainers.into_iter().filter(|t| t.is_active).collect();
                self.phase = Phase::Ready(Step::Trainer);
                None
            }
            (
                Phase::Loading {
                    target: Step::DateTime,
                    ..
                },
                Payload::Availability {
                    trainer_id,
                    windows,
                },
            ) => {
                self.availability = Some(Availability {
                    trainer_id,
                    windows: windows.into_iter().filter(|w| w.is_available).collect(),
                });
                self.phase = Phase::Ready(Step::DateTime);
                None
            }
            (Phase::Submitting { .. }, Payload::Created(booking)) => {
                info!(booking_id = booking.id, "booking created");
                self.last_booking = Some(booking);
                self.reset_draft();
                Some(Command::LoadBookings {
                    ticket: self.begin(Step::List, Step::List),
                })
            }
            (phase, payload) => {
                warn!(?phase, ?payload, "response does not match the pending request");
                self.phase = Phase::Ready(phase.fallback());
                self.error = Some(FlowError::internal("unexpected response from the server"));
                None
            }
        }
    }

    fn ready_in(&self, steps: &[Step]) -> Result<Step, Rejected> {
        match self.phase {
            Phase::Ready(step) if steps.contains(&step) => Ok(step),
            Phase::Ready(actual) => Err(Rejected::WrongStep { actual }),
            _ => Err(Rejected::Busy),
        }
    }

    fn issue(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    fn begin(&mut self, origin: Step, target: Step) -> Ticket {
        let ticket = self.issue();
        debug!(%origin, %target, %ticket, "loading");
        self.phase = Phase::Loading {
            origin,
            target,
            ticket,
        };
        ticket
    }

    fn start(&mut self, option_id: Option<SessionTypeOptionId>) -> Result<Option<Command>, Rejected> {
        self.ready_in(&[Step::List])?;
        self.reset_draft();
        self.pending_option = option_id;
        Ok(Some(Command::LoadCatalog {
            ticket: self.begin(Step::List, Step::Session),
            include_players: self.manages_players,
        }))
    }

    fn advance(&mut self) -> Result<Option<Command>, Rejected> {
        match self.ready_in(&[Step::Session, Step::Trainer, Step::DateTime])? {
            Step::Session => {
                if self.draft.option().is_none() {
                    return Err(Rejected::Missing("a session option"));
                }
                Ok(Some(self.enter_trainer()))
            }
            Step::Trainer => {
                let trainer_id = self
                    .draft
                    .trainer()
                    .map(|t| t.id)
                    .ok_or(Rejected::Missing("a trainer"))?;
                Ok(self.enter_datetime(trainer_id))
            }
            _ => {
                if !self.draft.is_complete() {
                    return Err(Rejected::Missing("a date and time"));
                }
                self.phase = Phase::Ready(Step::Confirm);
                Ok(None)
            }
        }
    }

    fn back(&mut self, to: Step) -> Result<(), Rejected> {
        // A create request cannot be recalled, so its outcome must be observed.
        if matches!(self.phase, Phase::Submitting { .. }) {
            return Err(Rejected::Busy);
        }
        let from = self.step();
        if to >= from {
            return Err(Rejected::NotBehind { from, to });
        }
        if let Some(ticket) = self.phase.ticket() {
            debug!(%ticket, %from, %to, "abandoning in-flight load");
        }
        if to == Step::List {
            self.reset_draft();
            self.pending_option = None;
        }
        self.phase = Phase::Ready(to);
        Ok(())
    }

    /// Fetched availability belongs to the draft it was fetched for.
    fn reset_draft(&mut self) {
        self.draft = BookingDraft::default();
        self.availability = None;
    }

    fn enter_trainer(&mut self) -> Command {
        Command::LoadTrainers {
            ticket: self.begin(Step::Session, Step::Trainer),
        }
    }

    fn enter_datetime(&mut self, trainer_id: TrainerId) -> Option<Command> {
        if self
            .availability
            .as_ref()
            .is_some_and(|a| a.trainer_id == trainer_id)
        {
            debug!(trainer_id, "reusing fetched availability");
            self.phase = Phase::Ready(Step::DateTime);
            return None;
        }
        Some(Command::LoadAvailability {
            ticket: self.begin(Step::Trainer, Step::DateTime),
            trainer_id,
        })
    }

    fn find_option(
        &self,
        session_type_id: Option<SessionTypeId>,
        option_id: SessionTypeOptionId,
    ) -> Result<(SessionType, SessionTypeOption), Rejected> {
        let (session_type, option) = self
            .session_types
            .iter()
            .filter(|st| session_type_id.is_none_or(|id| st.id == id))
            .find_map(|st| st.active_option(option_id).map(|o| (st, o)))
            .ok_or(Rejected::UnknownOption(option_id))?;
        if option.pricing_type == PricingType::Subscription {
            return Err(Rejected::SubscriptionOption(option_id));
        }
        Ok((session_type.clone(), option.clone()))
    }

    fn follow_deep_link(&mut self) -> Option<Command> {
        let option_id = self.pending_option.take()?;
        match self.find_option(None, option_id) {
            Ok((session_type, option)) => {
                self.draft.select_option(session_type, option);
                Some(self.enter_trainer())
            }
            Err(reason) => {
                debug!(option_id, %reason, "ignoring preselected option");
                None
            }
        }
    }

    fn set_bookings(&mut self, mut bookings: Vec<Booking>) {
        bookings.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));
        self.bookings = bookings;
    }

    fn finish_cancel(&mut self, result: Result<Payload, FlowError>) -> Option<Command> {
        match result {
            Ok(Payload::Cancelled(booking)) => {
                info!(booking_id = booking.id, "booking cancelled");
                if let Some(existing) = self.bookings.iter_mut().find(|b| b.id == booking.id) {
                    *existing = booking;
                }
                (self.phase == Phase::Ready(Step::List)).then(|| Command::LoadBookings {
                    ticket: self.begin(Step::List, Step::List),
                })
            }
            Ok(other) => {
                warn!(payload = ?other, "unexpected response to cancellation");
                self.error = Some(FlowError::internal("unexpected response from the server"));
                None
            }
            Err(error) => {
                warn!(error = %error, "cancellation failed");
                self.error = Some(error);
                None
            }
        }
    }
}
