// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The transient selection a user accumulates while booking.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use velo_core::model::{CreateBookingRequest, SessionType, SessionTypeOption, Trainer};
use velo_core::types::PlayerId;

/// Selections made so far in one pass through the booking flow.
///
/// Fields are only changed by the flow, which keeps the invalidation rules:
/// a different option clears trainer, date and time; a different trainer
/// clears date and time; a different date clears time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDraft {
    session_type: Option<SessionType>,
    option: Option<SessionTypeOption>,
    trainer: Option<Trainer>,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    player_id: Option<PlayerId>,
    notes: String,
}

impl BookingDraft {
    pub fn session_type(&self) -> Option<&SessionType> {
        self.session_type.as_ref()
    }

    pub fn option(&self) -> Option<&SessionTypeOption> {
        self.option.as_ref()
    }

    pub fn trainer(&self) -> Option<&Trainer> {
        self.trainer.as_ref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    pub fn player_id(&self) -> Option<PlayerId> {
        self.player_id
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// True once option, trainer, date and time are all chosen.
    pub fn is_complete(&self) -> bool {
        self.option.is_some() && self.trainer.is_some() && self.date.is_some() && self.time.is_some()
    }

    /// Date and time combined as a wall-clock value.
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        Some(self.date?.and_time(self.time?))
    }

    /// Builds the create-booking body, or `None` while incomplete.
    ///
    /// Blank notes are omitted.
    pub fn to_request(&self) -> Option<CreateBookingRequest> {
        let notes = self.notes.trim();
        Some(CreateBookingRequest {
            session_type_option_id: self.option.as_ref()?.id,
            trainer_id: self.trainer.as_ref()?.id,
            scheduled_at: self.scheduled_at()?,
            player_id: self.player_id,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }

    pub(crate) fn select_option(&mut self, session_type: SessionType, option: SessionTypeOption) {
        if self.option.as_ref().map(|o| o.id) != Some(option.id) {
            self.trainer = None;
            self.date = None;
            self.time = None;
        }
        self.session_type = Some(session_type);
        self.option = Some(option);
    }

    pub(crate) fn select_trainer(&mut self, trainer: Trainer) {
        if self.trainer.as_ref().map(|t| t.id) != Some(trainer.id) {
            self.date = None;
            self.time = None;
        }
        self.trainer = Some(trainer);
    }

    pub(crate) fn select_date(&mut self, date: NaiveDate) {
        if self.date != Some(date) {
            self.time = None;
        }
        self.date = Some(date);
    }

    pub(crate) fn select_time(&mut self, time: NaiveTime) {
        self.time = Some(time);
    }

    pub(crate) fn select_player(&mut self, player_id: Option<PlayerId>) {
        self.player_id = player_id;
    }

    pub(crate) fn set_notes(&mut self, notes: String) {
        self.notes = notes;
    }
}
