//! In-memory request store
//!
//! Records live in a `Vec` in submission order and are never removed.

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use super::traits::{RequestRepository, StatusCounts};
use crate::error::{Error, Result};
use crate::invariants::{assert_forward_transition, assert_record_invariants};
use crate::models::{
    ComplaintDetails, Identity, LeaveDetails, RequestDetails, RequestDraft, RequestKind,
    RequestRecord, RequestStatus,
};

#[derive(Debug, Default)]
pub struct InMemoryRequestStore {
    records: Vec<RequestRecord>,
}

impl InMemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of records (seed data)
    pub fn with_records(records: Vec<RequestRecord>) -> Self {
        for record in &records {
            assert_record_invariants(record);
        }
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, oldest first
    pub fn records(&self) -> &[RequestRecord] {
        &self.records
    }

    fn filtered(&self, pred: impl Fn(&RequestRecord) -> bool) -> Vec<RequestRecord> {
        self.records.iter().filter(|r| pred(r)).cloned().collect()
    }
}

fn required(value: &str, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn details_from_draft(draft: RequestDraft) -> Result<RequestDetails> {
    match draft {
        RequestDraft::Complaint(c) => Ok(RequestDetails::Complaint(ComplaintDetails {
            category: c.category,
            title: required(&c.title, "title")?,
            description: required(&c.description, "description")?,
            priority: c.priority,
            resolved_at: None,
            admin_notes: None,
        })),
        RequestDraft::Leave(l) => {
            let reason = required(&l.reason, "reason")?;
            if l.end_date < l.start_date {
                return Err(Error::InvalidField {
                    field: "end_date",
                    reason: format!("{} is before start date {}", l.end_date, l.start_date),
                });
            }
            Ok(RequestDetails::Leave(LeaveDetails {
                start_date: l.start_date,
                end_date: l.end_date,
                reason,
                reviewer_note: None,
            }))
        }
    }
}

/// Apply a status change to a copy of `record`
fn apply_transition(
    record: &RequestRecord,
    new_status: RequestStatus,
    reviewer_note: Option<&str>,
) -> Result<RequestRecord> {
    let kind = record.kind();
    if !kind.accepts(new_status) || !kind.allows(record.status, new_status) {
        return Err(Error::InvalidTransition {
            id: record.id,
            kind,
            from: record.status,
            to: new_status,
        });
    }

    let note = reviewer_note
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    let mut updated = record.clone();
    updated.status = new_status;
    match &mut updated.details {
        RequestDetails::Complaint(c) => {
            if new_status == RequestStatus::Resolved {
                c.resolved_at = Some(Utc::now());
            }
            if note.is_some() {
                c.admin_notes = note;
            }
        }
        RequestDetails::Leave(l) => {
            if note.is_some() {
                l.reviewer_note = note;
            }
        }
    }
    Ok(updated)
}

impl RequestRepository for InMemoryRequestStore {
    #[instrument(skip(self, owner, draft), fields(owner_id = %owner.id))]
    fn submit(&mut self, owner: &Identity, draft: RequestDraft) -> Result<RequestRecord> {
        required(&owner.id, "owner_id")?;
        let details = details_from_draft(draft)?;
        let record = RequestRecord::new(owner, details);
        assert_record_invariants(&record);

        tracing::info!(id = %record.id, kind = %record.kind(), "Request submitted");
        self.records.push(record.clone());
        Ok(record)
    }

    #[instrument(skip(self, reviewer_note))]
    fn transition(
        &mut self,
        id: Uuid,
        new_status: RequestStatus,
        reviewer_note: Option<&str>,
    ) -> Result<RequestRecord> {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("request {id}")))?;

        let updated = match apply_transition(slot, new_status, reviewer_note) {
            Ok(updated) => updated,
            Err(e) => {
                tracing::warn!(error = %e, "Transition rejected");
                return Err(e);
            }
        };
        assert_record_invariants(&updated);
        assert_forward_transition(&updated, slot.status);

        tracing::info!(from = %slot.status, to = %new_status, "Request transitioned");
        *slot = updated.clone();
        Ok(updated)
    }

    fn find(&self, id: Uuid) -> Option<RequestRecord> {
        self.records.iter().find(|r| r.id == id).cloned()
    }

    fn list_by_owner(&self, owner_id: &str) -> Vec<RequestRecord> {
        self.filtered(|r| r.owner_id == owner_id)
    }

    fn list_by_status(&self, status: RequestStatus) -> Vec<RequestRecord> {
        self.filtered(|r| r.status == status)
    }

    fn list_by_kind(&self, kind: RequestKind) -> Vec<RequestRecord> {
        self.filtered(|r| r.kind() == kind)
    }

    fn count_by_status(&self) -> StatusCounts {
        StatusCounts::from_records(&self.records)
    }
}
