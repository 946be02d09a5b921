//! Application state management
//!
//! The top-level context: owns the session, the request repository, the
//! navigation history and the static campus data. Everything runs on one
//! thread, one command at a time.

use chrono::Utc;
use hostel_core::campus::{self, AttendanceSummary, OccupancyStats};
use hostel_core::guard::{self, GuardState};
use hostel_core::{
    seed, AttendanceRecord, AttendanceStatus, Error, HostelConfig, Identity, InMemoryRequestStore,
    MessMenuItem, RequestDraft, RequestKind, RequestRecord, RequestRepository, RequestStatus,
    Result, Role, Room, Route, SessionStore, StudentProfile,
};
use std::cmp::Ordering;
use uuid::Uuid;

/// Navigation entries kept for `back`
const HISTORY_LIMIT: usize = 50;

/// Numeric ids sort numerically ("2" before "10"); anything else by string
fn id_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

/// Result of a navigation request after redirects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Rendered(Route),
    NotFound,
}

/// Main application state
pub struct AppState {
    pub session: SessionStore,
    pub requests: Box<dyn RequestRepository>,
    current_route: Option<Route>,
    history: Vec<String>,
    attendance: Vec<AttendanceRecord>,
    pub mess_menu: Vec<MessMenuItem>,
    pub rooms: Vec<Room>,
    pub students: Vec<StudentProfile>,
}

impl AppState {
    pub fn new(config: &HostelConfig) -> Result<Self> {
        let directory = config.directory()?;

        let records = if config.seed_demo_records {
            directory
                .identities()
                .filter(|i| i.role == Role::Student)
                .min_by(|a, b| id_order(&a.id, &b.id))
                .map(seed::requests)
                .unwrap_or_default()
        } else {
            Vec::new()
        };
        tracing::info!(accounts = directory.len(), records = records.len(), "Initialized state");

        Ok(Self {
            session: SessionStore::new(directory),
            requests: Box::new(InMemoryRequestStore::with_records(records)),
            current_route: None,
            history: Vec::new(),
            attendance: Vec::new(),
            mess_menu: seed::mess_menu(),
            rooms: seed::rooms(),
            students: seed::students(),
        })
    }

    pub fn current_route(&self) -> Option<Route> {
        self.current_route
    }

    pub fn current_identity(&self) -> Option<&Identity> {
        self.session.current_identity()
    }

    fn guard_state(&self) -> GuardState {
        self.session.guard_state()
    }

    /// Navigate to `path`, running the guard and following redirects
    pub fn navigate(&mut self, path: &str) -> NavOutcome {
        let outcome = match guard::resolve(self.guard_state(), path) {
            Some(route) => NavOutcome::Rendered(route),
            None => NavOutcome::NotFound,
        };

        let (entry, current) = match outcome {
            NavOutcome::Rendered(route) => (route.path().to_string(), Some(route)),
            NavOutcome::NotFound => (path.to_string(), None),
        };
        self.current_route = current;
        self.push_history(entry);
        outcome
    }

    fn push_history(&mut self, entry: String) {
        if self.history.last() == Some(&entry) {
            return;
        }
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(entry);
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Go back one entry; the previous path is re-checked by the guard
    pub fn back(&mut self) -> Option<NavOutcome> {
        if self.history.len() < 2 {
            return None;
        }
        self.history.pop();
        let previous = self.history.pop()?;
        Some(self.navigate(&previous))
    }

    /// Sign in and land on the role's home screen
    pub fn login(&mut self, email: &str, password: &str, role: Role) -> Result<Identity> {
        let identity = self.session.login(email, password, role)?;
        self.attendance = seed::attendance(&identity.id);
        self.navigate(guard::home_route(identity.role).path());
        Ok(identity)
    }

    /// Sign out and return to the login screen
    pub fn logout(&mut self) {
        self.session.logout();
        self.attendance.clear();
        self.history.clear();
        self.navigate(Route::Login.path());
    }

    /// Submit a request as the signed-in identity
    pub fn submit(&mut self, draft: RequestDraft) -> Result<RequestRecord> {
        let owner = self.session.current_identity().cloned().ok_or(Error::NotAuthenticated)?;
        self.requests.submit(&owner, draft)
    }

    /// Kind of request managed by the current screen, if it is a review
    /// screen the guard let a reviewer onto
    pub fn review_kind(&self) -> Option<RequestKind> {
        if !self.current_identity().is_some_and(|i| i.role.is_reviewer()) {
            return None;
        }
        match self.current_route? {
            Route::WardenComplaints | Route::AdminComplaints => Some(RequestKind::Complaint),
            Route::WardenLeaves | Route::AdminLeaves => Some(RequestKind::Leave),
            _ => None,
        }
    }

    pub fn on_review_screen(&self) -> bool {
        self.review_kind().is_some()
    }

    /// Apply a reviewer decision to a record picked by ID prefix.
    ///
    /// Only records of the kind the current review screen manages qualify.
    pub fn review(
        &mut self,
        id_prefix: &str,
        status: RequestStatus,
        note: Option<&str>,
    ) -> Result<RequestRecord> {
        let kind = self.review_kind().ok_or_else(|| Error::InvalidField {
            field: "route",
            reason: "not on a review screen".to_string(),
        })?;
        let id = self.resolve_id(id_prefix)?;
        let record = self
            .requests
            .find(id)
            .ok_or_else(|| Error::NotFound(format!("request {id}")))?;
        if record.kind() != kind {
            return Err(Error::InvalidField {
                field: "id",
                reason: format!("{} is a {}, this screen manages {}s", id_prefix, record.kind(), kind),
            });
        }
        self.requests.transition(id, status, note)
    }

    /// Resolve a full or shortened record ID
    pub fn resolve_id(&self, prefix: &str) -> Result<Uuid> {
        if let Ok(id) = Uuid::parse_str(prefix) {
            return Ok(id);
        }

        let prefix = prefix.trim().to_ascii_lowercase();
        let mut matches = self
            .all_records()
            .into_iter()
            .filter(|r| !prefix.is_empty() && r.id.to_string().starts_with(&prefix))
            .map(|r| r.id);

        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id),
            (Some(_), Some(_)) => Err(Error::InvalidField {
                field: "id",
                reason: format!("'{prefix}' matches more than one request"),
            }),
            (None, _) => Err(Error::NotFound(format!("request {prefix}"))),
        }
    }

    /// Every record, complaints first
    pub fn all_records(&self) -> Vec<RequestRecord> {
        let mut records = self.requests.list_by_kind(RequestKind::Complaint);
        records.extend(self.requests.list_by_kind(RequestKind::Leave));
        records
    }

    /// Records owned by the signed-in identity
    pub fn my_records(&self) -> Vec<RequestRecord> {
        match self.current_identity() {
            Some(identity) => self.requests.list_by_owner(&identity.id),
            None => Vec::new(),
        }
    }

    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    pub fn marked_today(&self) -> bool {
        campus::marked_on(&self.attendance, Utc::now().date_naive())
    }

    /// Record the signed-in student as present today.
    ///
    /// Returns `None` when today is already marked.
    pub fn mark_attendance(&mut self) -> Result<Option<AttendanceRecord>> {
        let student_id = self
            .current_identity()
            .map(|i| i.id.clone())
            .ok_or(Error::NotAuthenticated)?;
        if self.marked_today() {
            return Ok(None);
        }

        let record = AttendanceRecord {
            id: format!("att-{}", self.attendance.len() + 1),
            student_id,
            date: Utc::now().date_naive(),
            status: AttendanceStatus::Present,
        };
        tracing::info!(student_id = %record.student_id, date = %record.date, "Attendance marked");
        self.attendance.push(record.clone());
        Ok(Some(record))
    }

    pub fn attendance_summary(&self) -> AttendanceSummary {
        AttendanceSummary::from_records(&self.attendance)
    }

    pub fn todays_menu(&self) -> Option<&MessMenuItem> {
        campus::menu_for_date(&self.mess_menu, Utc::now().date_naive())
    }

    pub fn occupancy(&self) -> OccupancyStats {
        OccupancyStats::from_rooms(&self.rooms)
    }

    /// Export all records as pretty JSON
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.all_records())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostel_core::{ComplaintCategory, ComplaintDraft, Priority};

    fn state() -> AppState {
        AppState::new(&HostelConfig::default()).unwrap()
    }

    fn fan_complaint() -> RequestDraft {
        RequestDraft::Complaint(ComplaintDraft {
            category: ComplaintCategory::Electrical,
            title: "Fan broken".into(),
            description: "Ceiling fan does not turn on".into(),
            priority: Priority::Medium,
        })
    }

    #[test]
    fn test_seeded_records_belong_to_demo_student() {
        let state = state();
        assert_eq!(state.all_records().len(), 5);
        assert!(state.all_records().iter().all(|r| r.owner_id == "1"));
    }

    #[test]
    fn test_unseeded_state_is_empty() {
        let config = HostelConfig {
            seed_demo_records: false,
            ..HostelConfig::default()
        };
        let state = AppState::new(&config).unwrap();
        assert!(state.all_records().is_empty());
    }

    #[test]
    fn test_student_submits_complaint() {
        let mut state = state();
        let student = state
            .login("student@hostel.com", "1234", Role::Student)
            .unwrap();
        assert_eq!(student.role, Role::Student);
        assert_eq!(state.current_route(), Some(Route::StudentDashboard));

        let record = state.submit(fan_complaint()).unwrap();
        assert_eq!(record.status, RequestStatus::Pending);
        assert!(state
            .requests
            .list_by_owner(&student.id)
            .iter()
            .any(|r| r.id == record.id));
    }

    #[test]
    fn test_submit_while_signed_out() {
        let mut state = state();
        assert!(matches!(state.submit(fan_complaint()), Err(Error::NotAuthenticated)));
    }

    #[test]
    fn test_deep_link_redirects() {
        let mut state = state();
        assert_eq!(
            state.navigate("/admin/complaints"),
            NavOutcome::Rendered(Route::AdminLogin)
        );
        assert_eq!(state.navigate("/nowhere"), NavOutcome::NotFound);
        assert_eq!(state.current_route(), None);
    }

    #[test]
    fn test_back_is_guarded_after_logout() {
        let mut state = state();
        state.login("admin@hostel.com", "1234", Role::Admin).unwrap();
        state.navigate("/admin/complaints");
        assert!(state.on_review_screen());

        state.logout();
        state.navigate("/admin/complaints");
        assert_eq!(state.current_route(), Some(Route::AdminLogin));
        assert!(!state.on_review_screen());

        state.navigate("/login");
        assert_eq!(state.back(), Some(NavOutcome::Rendered(Route::AdminLogin)));
    }

    #[test]
    fn test_back_without_history() {
        let mut state = state();
        assert_eq!(state.back(), None);
    }

    #[test]
    fn test_review_by_prefix() {
        let mut state = state();
        state.login("warden@hostel.com", "1234", Role::Warden).unwrap();
        state.navigate("/warden/complaints");
        let pending = state.requests.list_by_status(RequestStatus::Pending);
        let complaint = pending
            .iter()
            .find(|r| r.kind() == RequestKind::Complaint)
            .unwrap();
        let prefix = complaint.id.to_string()[..8].to_string();

        let err = state.review(&prefix, RequestStatus::Resolved, None).unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));

        let updated = state
            .review(&prefix, RequestStatus::InProgress, Some("On it"))
            .unwrap();
        assert_eq!(updated.status, RequestStatus::InProgress);
    }

    #[test]
    fn test_review_rejects_other_kind_on_screen() {
        let mut state = state();
        state.login("warden@hostel.com", "1234", Role::Warden).unwrap();
        state.navigate("/warden/complaints");
        assert_eq!(state.review_kind(), Some(RequestKind::Complaint));

        let leave = state
            .requests
            .list_by_status(RequestStatus::Pending)
            .into_iter()
            .find(|r| r.kind() == RequestKind::Leave)
            .unwrap();
        let prefix = leave.id.to_string()[..8].to_string();

        let err = state.review(&prefix, RequestStatus::Approved, None).unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "id", .. }));
        assert_eq!(state.requests.find(leave.id).unwrap().status, RequestStatus::Pending);

        state.navigate("/warden/leaves");
        assert_eq!(state.review_kind(), Some(RequestKind::Leave));
        let approved = state.review(&prefix, RequestStatus::Approved, None).unwrap();
        assert_eq!(approved.status, RequestStatus::Approved);
    }

    #[test]
    fn test_review_off_review_screen() {
        let mut state = state();
        state.login("admin@hostel.com", "1234", Role::Admin).unwrap();
        let id = state.all_records()[0].id.to_string();
        assert!(state.review_kind().is_none());
        assert!(matches!(
            state.review(&id, RequestStatus::InProgress, None),
            Err(Error::InvalidField { field: "route", .. })
        ));
    }

    #[test]
    fn test_mark_attendance_once_per_day() {
        let mut state = state();
        assert!(matches!(state.mark_attendance(), Err(Error::NotAuthenticated)));

        state.login("student@hostel.com", "1234", Role::Student).unwrap();
        assert!(!state.marked_today());
        let record = state.mark_attendance().unwrap().unwrap();
        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.student_id, "1");
        assert!(state.marked_today());
        assert_eq!(state.attendance_summary().present, 6);

        assert!(state.mark_attendance().unwrap().is_none());
        assert_eq!(state.attendance().len(), 8);
    }

    #[test]
    fn test_history_collapses_repeats_and_is_capped() {
        let mut state = state();
        state.login("student@hostel.com", "1234", Role::Student).unwrap();
        let before = state.history_len();
        state.navigate("/attendance");
        state.navigate("/attendance");
        assert_eq!(state.history_len(), before + 1);

        for i in 0..(HISTORY_LIMIT * 2) {
            let path = if i % 2 == 0 { "/leave" } else { "/complaints" };
            state.navigate(path);
        }
        assert_eq!(state.history_len(), HISTORY_LIMIT);
        assert_eq!(state.back(), Some(NavOutcome::Rendered(Route::Leave)));
    }

    #[test]
    fn test_seed_owner_uses_numeric_id_order() {
        assert_eq!(id_order("2", "10"), Ordering::Less);
        assert_eq!(id_order("b", "a"), Ordering::Greater);

        let toml = r#"
[[accounts]]
id = "10"
name = "Ten"
email = "ten@hostel.com"
password = "x"
role = "student"

[[accounts]]
id = "2"
name = "Two"
email = "two@hostel.com"
password = "x"
role = "student"
"#;
        let config = HostelConfig::from_toml(toml).unwrap();
        let state = AppState::new(&config).unwrap();
        assert!(state.all_records().iter().all(|r| r.owner_id == "2"));
    }

    #[test]
    fn test_resolve_unknown_id() {
        let state = state();
        assert!(matches!(state.resolve_id("zzzz"), Err(Error::NotFound(_))));
        assert!(matches!(state.resolve_id(""), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_logout_clears_session() {
        let mut state = state();
        state.login("student@hostel.com", "1234", Role::Student).unwrap();
        assert_eq!(state.attendance().len(), 7);
        state.logout();
        assert!(state.current_identity().is_none());
        assert!(state.attendance().is_empty());
        assert_eq!(state.current_route(), Some(Route::Login));
    }

    #[test]
    fn test_export_json_lists_records() {
        let state = state();
        let json = state.export_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 5);
    }
}
