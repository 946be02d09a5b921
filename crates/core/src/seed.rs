//! Demo data loaded at startup
//!
//! A reload resets everything to these values.

use chrono::{Duration, NaiveDate, Utc};

use crate::models::{
    AttendanceRecord, AttendanceStatus, ComplaintCategory, ComplaintDetails, Identity,
    LeaveDetails, MessMenuItem, Priority, RequestDetails, RequestRecord, RequestStatus, Room,
    StudentProfile,
};

/// The last seven days of attendance for a student, oldest first
pub fn attendance(student_id: &str) -> Vec<AttendanceRecord> {
    use AttendanceStatus::*;

    let today = Utc::now().date_naive();
    let pattern = [Present, Present, Absent, Present, Leave, Present, Present];

    pattern
        .iter()
        .enumerate()
        .map(|(i, status)| AttendanceRecord {
            id: format!("att-{}", i + 1),
            student_id: student_id.to_string(),
            date: today - Duration::days((pattern.len() - i) as i64),
            status: *status,
        })
        .collect()
}

pub fn mess_menu() -> Vec<MessMenuItem> {
    let rows = [
        ("Monday", "Poha, Tea", "Dal, Rice, Roti, Aloo Gobi", "Samosa", "Paneer Butter Masala, Roti"),
        ("Tuesday", "Idli, Sambhar", "Rajma, Rice, Roti", "Biscuits, Tea", "Mix Veg, Dal, Roti"),
        ("Wednesday", "Paratha, Curd", "Chole, Rice, Roti", "Pakora", "Kadhi, Rice, Roti"),
        ("Thursday", "Upma, Coffee", "Dal Makhani, Jeera Rice", "Bread Pakora", "Bhindi, Dal, Roti"),
        ("Friday", "Dosa, Chutney", "Sambhar, Rice, Papad", "Kachori", "Malai Kofta, Roti"),
        ("Saturday", "Aloo Puri", "Khichdi, Kadhi", "Maggi", "Veg Biryani, Raita"),
        ("Sunday", "Chole Bhature", "Special Thali", "Jalebi", "Pav Bhaji"),
    ];

    rows.iter()
        .map(|(day, breakfast, lunch, snacks, dinner)| MessMenuItem {
            day: day.to_string(),
            breakfast: breakfast.to_string(),
            lunch: lunch.to_string(),
            snacks: snacks.to_string(),
            dinner: dinner.to_string(),
        })
        .collect()
}

pub fn rooms() -> Vec<Room> {
    let rows: [(&str, &str, u32, &[&str]); 8] = [
        ("A-101", "Block A", 2, &["Rahul Sharma", "Amit Kumar"]),
        ("A-102", "Block A", 2, &["Priya Singh"]),
        ("A-103", "Block A", 2, &["Vikram Patel", "Ravi Verma"]),
        ("B-201", "Block B", 3, &["Ananya Gupta", "Meera Joshi", "Neha Sharma"]),
        ("B-202", "Block B", 3, &["Kiran Rao"]),
        ("B-203", "Block B", 3, &[]),
        ("C-301", "Block C", 2, &["Arjun Das", "Suresh Nair"]),
        ("C-302", "Block C", 2, &["Deepak Jha"]),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (number, block, capacity, occupants))| Room {
            id: (i + 1).to_string(),
            number: number.to_string(),
            block: block.to_string(),
            capacity: *capacity,
            occupants: occupants.iter().map(|o| o.to_string()).collect(),
        })
        .collect()
}

pub fn students() -> Vec<StudentProfile> {
    let rows = [
        ("Rahul Sharma", "rahul", "A-101", "Block A"),
        ("Amit Kumar", "amit", "A-101", "Block A"),
        ("Priya Singh", "priya", "A-102", "Block A"),
        ("Vikram Patel", "vikram", "A-103", "Block A"),
        ("Ananya Gupta", "ananya", "B-201", "Block B"),
        ("Meera Joshi", "meera", "B-201", "Block B"),
        ("Arjun Das", "arjun", "C-301", "Block C"),
        ("Neha Sharma", "neha", "B-201", "Block B"),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (name, handle, room, block))| StudentProfile {
            id: (i + 1).to_string(),
            name: name.to_string(),
            email: format!("{handle}@student.edu"),
            phone: format!("+91 98765 432{:02}", 10 + i),
            room: room.to_string(),
            block: block.to_string(),
        })
        .collect()
}

fn complaint(
    owner: &Identity,
    category: ComplaintCategory,
    title: &str,
    description: &str,
    priority: Priority,
    status: RequestStatus,
) -> RequestRecord {
    let mut record = RequestRecord::new(
        owner,
        RequestDetails::Complaint(ComplaintDetails {
            category,
            title: title.to_string(),
            description: description.to_string(),
            priority,
            resolved_at: None,
            admin_notes: None,
        }),
    );
    record.status = status;
    if let RequestDetails::Complaint(details) = &mut record.details {
        if status == RequestStatus::Resolved {
            details.resolved_at = Some(record.created_at);
            details.admin_notes = Some("Replaced by maintenance".to_string());
        }
    }
    record
}

fn leave(
    owner: &Identity,
    start_date: NaiveDate,
    days: i64,
    reason: &str,
    status: RequestStatus,
) -> RequestRecord {
    let mut record = RequestRecord::new(
        owner,
        RequestDetails::Leave(LeaveDetails {
            start_date,
            end_date: start_date + Duration::days(days - 1),
            reason: reason.to_string(),
            reviewer_note: None,
        }),
    );
    record.status = status;
    record
}

/// Sample complaints and leave requests raised by `owner`
pub fn requests(owner: &Identity) -> Vec<RequestRecord> {
    let today = Utc::now().date_naive();

    vec![
        complaint(
            owner,
            ComplaintCategory::Electrical,
            "Tube light flickering",
            "The tube light near the study table flickers constantly.",
            Priority::Medium,
            RequestStatus::Pending,
        ),
        complaint(
            owner,
            ComplaintCategory::Plumbing,
            "Leaking tap",
            "Bathroom tap keeps dripping through the night.",
            Priority::High,
            RequestStatus::InProgress,
        ),
        complaint(
            owner,
            ComplaintCategory::Furniture,
            "Broken chair",
            "One leg of the study chair is cracked.",
            Priority::Low,
            RequestStatus::Resolved,
        ),
        leave(
            owner,
            today + Duration::days(3),
            3,
            "Sister's wedding",
            RequestStatus::Pending,
        ),
        leave(
            owner,
            today - Duration::days(20),
            2,
            "Medical appointment at home",
            RequestStatus::Approved,
        ),
    ]
}
