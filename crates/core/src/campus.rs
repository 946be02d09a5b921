//! Campus read models
//!
//! Pure projections over the static attendance, mess, room and resident
//! data. Nothing here mutates.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::{AttendanceRecord, AttendanceStatus, MessMenuItem, Room, StudentProfile};

/// Attendance tally for one student
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub present: usize,
    pub absent: usize,
    pub leave: usize,
}

impl AttendanceSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> Self {
        let mut summary = Self::default();
        for record in records {
            match record.status {
                AttendanceStatus::Present => summary.present += 1,
                AttendanceStatus::Absent => summary.absent += 1,
                AttendanceStatus::Leave => summary.leave += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.present + self.absent + self.leave
    }

    /// Percentage of recorded days marked present, rounded down
    pub fn rate_percent(&self) -> usize {
        match self.total() {
            0 => 0,
            total => self.present * 100 / total,
        }
    }
}

/// Whether attendance has already been recorded for `date`
pub fn marked_on(records: &[AttendanceRecord], date: NaiveDate) -> bool {
    records.iter().any(|r| r.date == date)
}

/// Full English weekday name as used in the mess schedule
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Menu entry for the weekday of `date`
pub fn menu_for_date(menu: &[MessMenuItem], date: NaiveDate) -> Option<&MessMenuItem> {
    let day = weekday_name(date.weekday());
    menu.iter().find(|item| item.day.eq_ignore_ascii_case(day))
}

/// Room occupancy stats shown on the rooms screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OccupancyStats {
    pub rooms: usize,
    pub capacity: u32,
    pub occupied: u32,
    pub empty_rooms: usize,
    pub full_rooms: usize,
}

impl OccupancyStats {
    pub fn from_rooms(rooms: &[Room]) -> Self {
        Self {
            rooms: rooms.len(),
            capacity: rooms.iter().map(|r| r.capacity).sum(),
            occupied: rooms.iter().map(|r| r.occupants.len() as u32).sum(),
            empty_rooms: rooms.iter().filter(|r| r.is_empty()).count(),
            full_rooms: rooms.iter().filter(|r| r.is_full()).count(),
        }
    }

    pub fn vacant_beds(&self) -> u32 {
        self.capacity.saturating_sub(self.occupied)
    }
}

/// Case-insensitive search over name, email and room number.
/// An empty query returns everyone.
pub fn search_students<'a>(students: &'a [StudentProfile], query: &str) -> Vec<&'a StudentProfile> {
    let query = query.trim().to_lowercase();
    students
        .iter()
        .filter(|s| {
            query.is_empty()
                || s.name.to_lowercase().contains(&query)
                || s.email.to_lowercase().contains(&query)
                || s.room.to_lowercase().contains(&query)
        })
        .collect()
}
