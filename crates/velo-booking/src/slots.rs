// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Derivation of bookable half-hour start times from weekly availability.
//!
//! Slots are a convenience for picking a time; the backend re-validates every
//! booking against the trainer's availability and existing bookings.

use chrono::{NaiveDate, NaiveTime, Timelike};
use velo_core::model::AvailabilityWindow;
use velo_core::DayOfWeek;

/// Minutes between consecutive slot start times.
pub const SLOT_MINUTES: u32 = 30;

/// Candidate start times on `date` for the given availability windows.
///
/// Windows for other days and disabled windows are ignored. Each matching
/// window contributes `HH:00` and `HH:30` for every whole hour from its start
/// hour up to, not including, its end hour; minutes of the window bounds are
/// not considered. Output keeps window order and is neither sorted nor
/// deduplicated. No match yields an empty list.
pub fn derive_slots(windows: &[AvailabilityWindow], date: NaiveDate) -> Vec<NaiveTime> {
    let day = DayOfWeek::of(date);
    windows
        .iter()
        .filter(|w| w.is_available && w.day_of_week == day)
        .flat_map(|w| half_hour_marks(w.start_time.hour(), w.end_time.hour()))
        .collect()
}

fn half_hour_marks(start_hour: u32, end_hour: u32) -> impl Iterator<Item = NaiveTime> {
    (start_hour..end_hour).flat_map(|hour| {
        (0..60)
            .step_by(SLOT_MINUTES as usize)
            .filter_map(move |minute| NaiveTime::from_hms_opt(hour, minute, 0))
    })
}

/// Distinct days with at least one enabled window, in window order.
pub fn availability_days(windows: &[AvailabilityWindow]) -> Vec<DayOfWeek> {
    let mut days = Vec::new();
    for window in windows.iter().filter(|w| w.is_available) {
        if !days.contains(&window.day_of_week) {
            days.push(window.day_of_week);
        }
    }
    days
}

/// `HH:mm` rendering used for slots everywhere.
pub fn format_slot(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    // 2030-01-07 is a Monday.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 7).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn window(day: DayOfWeek, start: NaiveTime, end: NaiveTime) -> AvailabilityWindow {
        AvailabilityWindow {
            id: 1,
            trainer_id: 5,
            day_of_week: day,
            start_time: start,
            end_time: end,
            is_available: true,
        }
    }

    fn rendered(slots: &[NaiveTime]) -> Vec<String> {
        slots.iter().copied().map(format_slot).collect()
    }

    #[test]
    fn two_hour_window_yields_four_slots_excluding_end() {
        let windows = [window(DayOfWeek::Monday, hm(9, 0), hm(11, 0))];
        assert_eq!(
            rendered(&derive_slots(&windows, monday())),
            ["09:00", "09:30", "10:00", "10:30"]
        );
    }

    #[test]
    fn zero_width_window_yields_nothing() {
        let windows = [window(DayOfWeek::Monday, hm(9, 0), hm(9, 0))];
        assert!(derive_slots(&windows, monday()).is_empty());
    }

    #[test]
    fn sub_hour_window_yields_nothing() {
        let windows = [window(DayOfWeek::Monday, hm(9, 15), hm(9, 45))];
        assert!(derive_slots(&windows, monday()).is_empty());
    }

    #[test]
    fn minutes_of_bounds_are_truncated() {
        let windows = [window(DayOfWeek::Monday, hm(9, 45), hm(11, 15))];
        assert_eq!(
            rendered(&derive_slots(&windows, monday())),
            ["09:00", "09:30", "10:00", "10:30"]
        );
    }

    #[test]
    fn windows_concatenate_in_order_without_dedup() {
        let windows = [
            window(DayOfWeek::Monday, hm(14, 0), hm(15, 0)),
            window(DayOfWeek::Tuesday, hm(8, 0), hm(9, 0)),
            window(DayOfWeek::Monday, hm(9, 0), hm(10, 0)),
            window(DayOfWeek::Monday, hm(9, 0), hm(10, 0)),
        ];
        assert_eq!(
            rendered(&derive_slots(&windows, monday())),
            ["14:00", "14:30", "09:00", "09:30", "09:00", "09:30"]
        );
    }

    #[test]
    fn disabled_windows_are_ignored() {
        let mut closed = window(DayOfWeek::Monday, hm(9, 0), hm(12, 0));
        closed.is_available = false;
        assert!(derive_slots(&[closed], monday()).is_empty());
    }

    #[test]
    fn availability_days_are_distinct_in_order() {
        let windows = [
            window(DayOfWeek::Friday, hm(9, 0), hm(10, 0)),
            window(DayOfWeek::Monday, hm(9, 0), hm(10, 0)),
            window(DayOfWeek::Friday, hm(13, 0), hm(14, 0)),
        ];
        assert_eq!(
            availability_days(&windows),
            [DayOfWeek::Friday, DayOfWeek::Monday]
        );
    }

    fn any_day() -> impl Strategy<Value = DayOfWeek> {
        prop_oneof![
            Just(DayOfWeek::Monday),
            Just(DayOfWeek::Tuesday),
            Just(DayOfWeek::Wednesday),
            Just(DayOfWeek::Thursday),
            Just(DayOfWeek::Friday),
            Just(DayOfWeek::Saturday),
            Just(DayOfWeek::Sunday),
        ]
    }

    fn any_window() -> impl Strategy<Value = AvailabilityWindow> {
        (any_day(), 0u32..24, 0u32..60, 0u32..24, 0u32..60, any::<bool>()).prop_map(
            |(day, sh, sm, eh, em, open)| AvailabilityWindow {
                id: 1,
                trainer_id: 5,
                day_of_week: day,
                start_time: hm(sh, sm),
                end_time: hm(eh, em),
                is_available: open,
            },
        )
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (0i64..3650).prop_map(|offset| monday() + chrono::Duration::days(offset))
    }

    proptest! {
        #[test]
        fn derivation_is_deterministic(
            windows in prop::collection::vec(any_window(), 0..8),
            date in any_date(),
        ) {
            prop_assert_eq!(derive_slots(&windows, date), derive_slots(&windows, date));
        }

        #[test]
        fn no_matching_day_means_no_slots(
            windows in prop::collection::vec(any_window(), 0..8),
            date in any_date(),
        ) {
            let day = DayOfWeek::of(date);
            let others: Vec<_> = windows.into_iter().filter(|w| w.day_of_week != day).collect();
            prop_assert!(derive_slots(&others, date).is_empty());
        }

        #[test]
        fn slot_count_is_twice_the_hour_span(window in any_window(), date in any_date()) {
            let mut window = window;
            window.day_of_week = DayOfWeek::of(date);
            window.is_available = true;
            let span = window.end_time.hour().saturating_sub(window.start_time.hour());
            let slots = derive_slots(std::slice::from_ref(&window), date);
            prop_assert_eq!(slots.len() as u32, span * 2);
            prop_assert!(slots.iter().all(|t| t.minute() % SLOT_MINUTES == 0));
        }
    }
}
