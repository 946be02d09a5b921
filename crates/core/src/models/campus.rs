//! Read-only campus data: attendance, mess menu, rooms, residents

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// One day of the weekly mess schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessMenuItem {
    /// Full weekday name, e.g. "Monday"
    pub day: String,
    pub breakfast: String,
    pub lunch: String,
    pub snacks: String,
    pub dinner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub number: String,
    pub block: String,
    pub capacity: u32,
    pub occupants: Vec<String>,
}

impl Room {
    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.occupants.len() as u32 >= self.capacity
    }
}

/// Resident listing shown to administrators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub room: String,
    pub block: String,
}
