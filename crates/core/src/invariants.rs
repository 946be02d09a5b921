//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use crate::models::{RequestDetails, RequestRecord, RequestStatus};

/// Validate that a request record is internally consistent
pub fn assert_record_invariants(record: &RequestRecord) {
    debug_assert!(
        !record.owner_id.trim().is_empty(),
        "Request {} has empty owner_id",
        record.id
    );

    debug_assert!(
        record.kind().accepts(record.status),
        "Request {} is a {} but has status {}",
        record.id,
        record.kind(),
        record.status
    );

    match &record.details {
        RequestDetails::Complaint(c) => {
            // resolved_at is stamped exactly when a complaint is resolved
            debug_assert_eq!(
                c.resolved_at.is_some(),
                record.status == RequestStatus::Resolved,
                "Complaint {} has status {} but resolved_at {:?}",
                record.id,
                record.status,
                c.resolved_at
            );
        }
        RequestDetails::Leave(l) => {
            debug_assert!(
                l.start_date <= l.end_date,
                "Leave {} ends {} before it starts {}",
                record.id,
                l.end_date,
                l.start_date
            );
        }
    }
}

/// Validate that a status change only moves forward
pub fn assert_forward_transition(record: &RequestRecord, previous: RequestStatus) {
    debug_assert!(
        !previous.is_terminal(),
        "Request {} left terminal status {}",
        record.id,
        previous
    );
    debug_assert!(
        record.kind().allows(previous, record.status),
        "Request {} moved {} -> {} outside its graph",
        record.id,
        previous,
        record.status
    );
}
