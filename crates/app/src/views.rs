//! Plain-text screens
//!
//! Presentation only: every screen reads from [`AppState`] and never mutates.

use std::fmt::Write;

use hostel_core::campus::search_students;
use hostel_core::guard;
use hostel_core::{
    AttendanceStatus, Priority, RequestDetails, RequestKind, RequestRecord, RequestRepository,
    RequestStatus, Route,
};

use crate::state::AppState;
use crate::viewmodel::short_id;

pub fn not_found(path: &str) -> String {
    format!("404 | Page not found: {path}\nUse `go /` to return home.")
}

pub fn render(state: &AppState, route: Route) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ({}) ==", route.title(), route.path());
    if let Some(identity) = state.current_identity() {
        let menu: Vec<&str> = guard::menu_for(identity.role)
            .into_iter()
            .map(|r| r.path())
            .collect();
        let _ = writeln!(out, "{} | {}", identity.name, menu.join("  "));
    }

    let body = match route {
        Route::Landing | Route::Login => login_screen(false),
        Route::AdminLogin => login_screen(true),
        Route::StudentDashboard => student_dashboard(state),
        Route::Attendance => attendance(state),
        Route::Leave => owned_list(state, RequestKind::Leave),
        Route::Complaints => owned_list(state, RequestKind::Complaint),
        Route::MessMenu => mess_menu(state),
        Route::WardenDashboard => warden_dashboard(state),
        Route::WardenLeaves | Route::AdminLeaves => review_list(state, RequestKind::Leave),
        Route::WardenComplaints | Route::AdminComplaints => {
            review_list(state, RequestKind::Complaint)
        }
        Route::AdminDashboard => admin_dashboard(state),
        Route::AdminAnalytics => analytics(state),
        Route::AdminRooms => rooms(state),
        Route::AdminStudents => students(state, ""),
    };
    out.push_str(&body);
    out
}

fn login_screen(admin: bool) -> String {
    if admin {
        "Secure admin access.\n  admin-login <email> <password>\n".to_string()
    } else {
        "Sign in as student, warden or admin.\n  login <email> <password> <role>\n".to_string()
    }
}

fn student_dashboard(state: &AppState) -> String {
    let mut out = String::new();
    if let Some(identity) = state.current_identity() {
        let _ = writeln!(out, "Welcome, {}", identity.name);
        if let (Some(room), Some(block)) = (&identity.room_number, &identity.hostel_block) {
            let _ = writeln!(out, "Room {room}, {block}");
        }
    }
    let mine = state.my_records();
    let open = mine.iter().filter(|r| !r.status.is_terminal()).count();
    let _ = writeln!(out, "Open requests: {open}");
    if let Some(menu) = state.todays_menu() {
        let _ = writeln!(out, "Today's dinner: {}", menu.dinner);
    }
    out.push_str("Note: Hostel gates close at 9:00 PM sharp.\n");
    out
}

fn attendance(state: &AppState) -> String {
    let summary = state.attendance_summary();
    let mut out = format!(
        "Present {} | Absent {} | Leave {} | Rate {}%\n",
        summary.present,
        summary.absent,
        summary.leave,
        summary.rate_percent()
    );
    if state.marked_today() {
        out.push_str("Marked present today\n");
    } else {
        out.push_str("Not marked today: `mark`\n");
    }
    for record in state.attendance() {
        let status = match record.status {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Leave => "leave",
        };
        let _ = writeln!(out, "  {}  {}", record.date, status);
    }
    out
}

fn mess_menu(state: &AppState) -> String {
    let mut out = String::new();
    match state.todays_menu() {
        Some(today) => {
            let _ = writeln!(
                out,
                "Today ({}): {} / {} / {} / {}",
                today.day, today.breakfast, today.lunch, today.snacks, today.dinner
            );
        }
        None => out.push_str("No menu for today\n"),
    }
    for item in &state.mess_menu {
        let _ = writeln!(
            out,
            "  {:<10} {} | {} | {} | {}",
            item.day, item.breakfast, item.lunch, item.snacks, item.dinner
        );
    }
    out
}

fn record_line(record: &RequestRecord) -> String {
    let mut line = format!(
        "  {}  {:<11} {}",
        short_id(&record.id),
        record.status.as_str(),
        record.summary()
    );
    match &record.details {
        RequestDetails::Complaint(c) => {
            let _ = write!(line, " ({})", c.priority.as_str());
            if let Some(notes) = &c.admin_notes {
                let _ = write!(line, " | note: {notes}");
            }
        }
        RequestDetails::Leave(l) => {
            let _ = write!(line, " ({} days)", l.days());
            if let Some(note) = &l.reviewer_note {
                let _ = write!(line, " | note: {note}");
            }
        }
    }
    line
}

fn owned_list(state: &AppState, kind: RequestKind) -> String {
    let records: Vec<RequestRecord> = state
        .my_records()
        .into_iter()
        .filter(|r| r.kind() == kind)
        .collect();

    let mut out = match kind {
        RequestKind::Complaint => {
            "New: complain <category> <priority> <title> | <description>\n".to_string()
        }
        RequestKind::Leave => "Apply: leave <start YYYY-MM-DD> <end YYYY-MM-DD> <reason>\n".to_string(),
    };
    if records.is_empty() {
        out.push_str("  (none yet)\n");
    }
    for record in &records {
        out.push_str(&record_line(record));
        out.push('\n');
    }
    out
}

fn review_list(state: &AppState, kind: RequestKind) -> String {
    let records = state.requests.list_by_kind(kind);
    let mut out = String::new();

    let statuses: &[RequestStatus] = match kind {
        RequestKind::Complaint => &[
            RequestStatus::Pending,
            RequestStatus::InProgress,
            RequestStatus::Resolved,
        ],
        RequestKind::Leave => &[
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ],
    };
    let tally: Vec<String> = statuses
        .iter()
        .map(|s| format!("{} {}", s, records.iter().filter(|r| r.status == *s).count()))
        .collect();
    let _ = writeln!(out, "{}", tally.join(" | "));

    for record in &records {
        let next: Vec<&str> = kind
            .next_statuses(record.status)
            .iter()
            .map(|s| s.as_str())
            .collect();
        let _ = write!(out, "{}  by {}", record_line(record), record.owner_name);
        if !next.is_empty() {
            let _ = write!(out, "  -> {}", next.join("|"));
        }
        out.push('\n');
    }
    match kind {
        RequestKind::Complaint => out.push_str("Actions: start <id> [note], resolve <id> [note]\n"),
        RequestKind::Leave => out.push_str("Actions: approve <id> [note], reject <id> [note]\n"),
    }
    out
}

fn warden_dashboard(state: &AppState) -> String {
    let counts = state.requests.count_by_status();
    format!(
        "Welcome, Warden! Manage blocks, attendance, leave and complaints.\n\
         Pending requests: {}\n",
        counts.get(RequestStatus::Pending)
    )
}

/// Pending leave and complaint counts, plus open high-priority complaints
fn admin_dashboard(state: &AppState) -> String {
    let pending = state.requests.list_by_status(RequestStatus::Pending);
    let pending_leaves = pending.iter().filter(|r| r.kind() == RequestKind::Leave).count();
    let pending_complaints = pending.len() - pending_leaves;

    let urgent: Vec<RequestRecord> = state
        .requests
        .list_by_kind(RequestKind::Complaint)
        .into_iter()
        .filter(|r| r.status != RequestStatus::Resolved)
        .filter(|r| {
            matches!(&r.details, RequestDetails::Complaint(c) if c.priority == Priority::High)
        })
        .collect();

    let occupancy = state.occupancy();
    let mut out = String::new();
    if let Some(identity) = state.current_identity() {
        let _ = writeln!(out, "Welcome back, {}. Here's an overview of your hostel.", identity.name);
    }
    let _ = writeln!(out, "Students: {}", state.students.len());
    let _ = writeln!(out, "Occupied beds: {}/{}", occupancy.occupied, occupancy.capacity);
    let _ = writeln!(out, "Pending complaints: {pending_complaints}");
    let _ = writeln!(out, "Pending leaves: {pending_leaves}");
    let _ = writeln!(out, "High priority open: {}", urgent.len());
    for record in &urgent {
        out.push_str(&record_line(record));
        out.push('\n');
    }
    out
}

fn analytics(state: &AppState) -> String {
    let counts = state.requests.count_by_status();
    let occupancy = state.occupancy();
    let mut out = String::new();
    let _ = writeln!(out, "Students: {}", state.students.len());
    let _ = writeln!(
        out,
        "Rooms: {} ({} of {} beds occupied)",
        occupancy.rooms, occupancy.occupied, occupancy.capacity
    );
    for (status, count) in counts.iter() {
        let _ = writeln!(out, "  {status}: {count}");
    }
    out
}

fn rooms(state: &AppState) -> String {
    let stats = state.occupancy();
    let mut out = format!(
        "Total {} | Capacity {} | Occupied {} | Vacant beds {} | Empty {} | Full {}\n",
        stats.rooms,
        stats.capacity,
        stats.occupied,
        stats.vacant_beds(),
        stats.empty_rooms,
        stats.full_rooms
    );
    for room in &state.rooms {
        let _ = writeln!(
            out,
            "  {} {:<8} {}/{}  {}",
            room.number,
            room.block,
            room.occupants.len(),
            room.capacity,
            room.occupants.join(", ")
        );
    }
    out
}

/// Resident listing filtered by `query`
pub fn students(state: &AppState, query: &str) -> String {
    let found = search_students(&state.students, query);
    let mut out = format!("{} of {} students\n", found.len(), state.students.len());
    for s in found {
        let _ = writeln!(out, "  {:<14} {:<20} {} {}", s.name, s.email, s.room, s.phone);
    }
    out
}
