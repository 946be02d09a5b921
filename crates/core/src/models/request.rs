//! Complaint and leave request records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Identity;

/// The two kinds of request a student can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Complaint,
    Leave,
}

impl RequestKind {
    pub fn label(&self) -> &'static str {
        match self {
            RequestKind::Complaint => "complaint",
            RequestKind::Leave => "leave request",
        }
    }

    /// Whether `status` belongs to this kind's state graph
    pub fn accepts(&self, status: RequestStatus) -> bool {
        match self {
            RequestKind::Complaint => matches!(
                status,
                RequestStatus::Pending | RequestStatus::InProgress | RequestStatus::Resolved
            ),
            RequestKind::Leave => matches!(
                status,
                RequestStatus::Pending | RequestStatus::Approved | RequestStatus::Rejected
            ),
        }
    }

    /// Allowed edges of the state graph.
    ///
    /// Complaints: pending -> in-progress -> resolved.
    /// Leave: pending -> approved | rejected.
    pub fn allows(&self, from: RequestStatus, to: RequestStatus) -> bool {
        use RequestStatus::*;
        match self {
            RequestKind::Complaint => matches!((from, to), (Pending, InProgress) | (InProgress, Resolved)),
            RequestKind::Leave => matches!((from, to), (Pending, Approved) | (Pending, Rejected)),
        }
    }

    /// Statuses reachable in one step from `from`
    pub fn next_statuses(&self, from: RequestStatus) -> Vec<RequestStatus> {
        RequestStatus::all()
            .iter()
            .copied()
            .filter(|to| self.allows(from, *to))
            .collect()
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Union of the complaint and leave status domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestStatus {
    Pending,
    InProgress,
    Resolved,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::InProgress => "in-progress",
            RequestStatus::Resolved => "resolved",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::Resolved | RequestStatus::Approved | RequestStatus::Rejected
        )
    }

    pub fn all() -> &'static [RequestStatus] {
        &[
            RequestStatus::Pending,
            RequestStatus::InProgress,
            RequestStatus::Resolved,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ]
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(RequestStatus::Pending),
            "in-progress" | "in_progress" | "inprogress" => Ok(RequestStatus::InProgress),
            "resolved" => Ok(RequestStatus::Resolved),
            "approved" => Ok(RequestStatus::Approved),
            "rejected" => Ok(RequestStatus::Rejected),
            other => Err(format!("Unknown status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintCategory {
    Electrical,
    Plumbing,
    Furniture,
    Cleaning,
    Other,
}

impl ComplaintCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintCategory::Electrical => "electrical",
            ComplaintCategory::Plumbing => "plumbing",
            ComplaintCategory::Furniture => "furniture",
            ComplaintCategory::Cleaning => "cleaning",
            ComplaintCategory::Other => "other",
        }
    }
}

impl std::str::FromStr for ComplaintCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "electrical" => Ok(ComplaintCategory::Electrical),
            "plumbing" => Ok(ComplaintCategory::Plumbing),
            "furniture" => Ok(ComplaintCategory::Furniture),
            "cleaning" => Ok(ComplaintCategory::Cleaning),
            "other" => Ok(ComplaintCategory::Other),
            other => Err(format!("Unknown category: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("Unknown priority: {other}")),
        }
    }
}

/// Complaint-specific fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintDetails {
    pub category: ComplaintCategory,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub resolved_at: Option<DateTime<Utc>>,
    pub admin_notes: Option<String>,
}

/// Leave-specific fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDetails {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub reviewer_note: Option<String>,
}

impl LeaveDetails {
    /// Inclusive number of days covered
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RequestDetails {
    Complaint(ComplaintDetails),
    Leave(LeaveDetails),
}

/// A complaint or leave request raised by a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub id: Uuid,
    pub owner_id: String,
    pub owner_name: String,
    pub room_number: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub details: RequestDetails,
}

impl RequestRecord {
    /// Build a fresh pending record owned by `owner`
    pub fn new(owner: &Identity, details: RequestDetails) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner.id.clone(),
            owner_name: owner.name.clone(),
            room_number: owner.room_number.clone(),
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            details,
        }
    }

    pub fn kind(&self) -> RequestKind {
        match self.details {
            RequestDetails::Complaint(_) => RequestKind::Complaint,
            RequestDetails::Leave(_) => RequestKind::Leave,
        }
    }

    /// Short headline for listings
    pub fn summary(&self) -> String {
        match &self.details {
            RequestDetails::Complaint(c) => format!("[{}] {}", c.category.as_str(), c.title),
            RequestDetails::Leave(l) => format!("{} to {}: {}", l.start_date, l.end_date, l.reason),
        }
    }
}

/// Submission form for a complaint
#[derive(Debug, Clone)]
pub struct ComplaintDraft {
    pub category: ComplaintCategory,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

/// Submission form for a leave request
#[derive(Debug, Clone)]
pub struct LeaveDraft {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub enum RequestDraft {
    Complaint(ComplaintDraft),
    Leave(LeaveDraft),
}

#[cfg(test)]
mod tests {
    use super::*;
    use RequestStatus::*;

    #[test]
    fn test_complaint_graph() {
        let kind = RequestKind::Complaint;
        assert!(kind.allows(Pending, InProgress));
        assert!(kind.allows(InProgress, Resolved));
        assert!(!kind.allows(Pending, Resolved));
        assert!(!kind.allows(Resolved, Pending));
        assert!(!kind.allows(InProgress, Pending));
        assert!(!kind.allows(Pending, Approved));
    }

    #[test]
    fn test_leave_graph() {
        let kind = RequestKind::Leave;
        assert_eq!(kind.next_statuses(Pending), vec![Approved, Rejected]);
        assert!(kind.next_statuses(Approved).is_empty());
        assert!(kind.next_statuses(Rejected).is_empty());
        assert!(!kind.allows(Pending, InProgress));
    }

    #[test]
    fn test_terminal_statuses_have_no_exits() {
        for kind in [RequestKind::Complaint, RequestKind::Leave] {
            for status in RequestStatus::all() {
                if status.is_terminal() {
                    assert!(kind.next_statuses(*status).is_empty());
                }
            }
        }
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("in-progress".parse::<RequestStatus>().unwrap(), InProgress);
        assert_eq!("In_Progress".parse::<RequestStatus>().unwrap(), InProgress);
        assert!("done".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&InProgress).unwrap(), "\"in-progress\"");
    }

    #[test]
    fn test_leave_days_inclusive() {
        let details = LeaveDetails {
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            reason: "Home".into(),
            reviewer_note: None,
        };
        assert_eq!(details.days(), 3);
    }
}
