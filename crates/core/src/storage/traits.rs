//! Storage repository traits
//!
//! The request repository is the seam between the front end and wherever
//! records live. Only the in-memory store exists today.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::error::Result;
use crate::models::{Identity, RequestDraft, RequestKind, RequestRecord, RequestStatus};

/// Complaint and leave request operations
pub trait RequestRepository {
    /// Append a new pending record owned by `owner`
    fn submit(&mut self, owner: &Identity, draft: RequestDraft) -> Result<RequestRecord>;

    /// Move a record to `new_status`.
    ///
    /// Callers are expected to be reviewers; the route guard is the only
    /// place that checks this.
    fn transition(
        &mut self,
        id: Uuid,
        new_status: RequestStatus,
        reviewer_note: Option<&str>,
    ) -> Result<RequestRecord>;

    /// Find a record by ID
    fn find(&self, id: Uuid) -> Option<RequestRecord>;

    /// Records raised by one identity, oldest first
    fn list_by_owner(&self, owner_id: &str) -> Vec<RequestRecord>;

    /// Records currently in `status`, oldest first
    fn list_by_status(&self, status: RequestStatus) -> Vec<RequestRecord>;

    /// Records of one kind, oldest first
    fn list_by_kind(&self, kind: RequestKind) -> Vec<RequestRecord>;

    /// Record count per status; absent statuses count zero
    fn count_by_status(&self) -> StatusCounts;
}

/// Per-status tally
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts(BTreeMap<RequestStatus, usize>);

impl StatusCounts {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a RequestRecord>) -> Self {
        let mut counts = BTreeMap::new();
        for record in records {
            *counts.entry(record.status).or_insert(0) += 1;
        }
        Self(counts)
    }

    pub fn get(&self, status: RequestStatus) -> usize {
        self.0.get(&status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RequestStatus, usize)> + '_ {
        self.0.iter().map(|(s, n)| (*s, *n))
    }
}
