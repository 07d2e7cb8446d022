//! Request review workflow — the four-state status machine.
//!
//! States: `pending → in_review → {approved, declined}`. The two end states
//! are terminal. Every transition validates the current state first and
//! rejects anything else with an error; state is never silently coerced.

pub mod handlers;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    InReview,
    Approved,
    Declined,
}

impl RequestStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Approved | RequestStatus::Declined)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::InReview => "in_review",
            RequestStatus::Approved => "approved",
            RequestStatus::Declined => "declined",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Faculty actions that drive the status machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    Accept,
    Approve,
    Decline,
}

impl RequestAction {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestAction::Accept => "accept",
            RequestAction::Approve => "approve",
            RequestAction::Decline => "decline",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot {action} a request in status '{from}'")]
    Invalid {
        from: RequestStatus,
        action: &'static str,
    },

    #[error("cannot approve a request without a non-empty draft")]
    EmptyDraft,
}

/// Computes the next status for `action` applied to a request currently in
/// `current` with draft text `draft`.
///
/// Rules:
/// - `accept`:  pending → in_review
/// - `approve`: in_review → approved, only when `draft` is non-empty
///   (whitespace-only counts as empty)
/// - `decline`: in_review → declined
pub fn apply(
    current: RequestStatus,
    action: RequestAction,
    draft: Option<&str>,
) -> Result<RequestStatus, TransitionError> {
    match (current, action) {
        (RequestStatus::Pending, RequestAction::Accept) => Ok(RequestStatus::InReview),
        (RequestStatus::InReview, RequestAction::Approve) => {
            match draft {
                Some(d) if !d.trim().is_empty() => Ok(RequestStatus::Approved),
                _ => Err(TransitionError::EmptyDraft),
            }
        }
        (RequestStatus::InReview, RequestAction::Decline) => Ok(RequestStatus::Declined),
        (from, action) => Err(TransitionError::Invalid {
            from,
            action: action.as_str(),
        }),
    }
}
