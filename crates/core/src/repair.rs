//! Repair status domain: status enum, transition table, outcome messages.
//!
//! A repair moves through the regular flow (pending -> repairing -> repaired
//! -> picked_up, or unrepairable) and, once under warranty rework, through
//! the rework flow (reworking -> reworked -> picked_up). `picked_up` is the
//! shared terminal label of both flows; which side effect it carries depends
//! on the repair's `is_rework` flag. The transition table makes cross-flow
//! requests explicit and rejectable instead of silently falling through.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;
use crate::warranty::format_expiry_date;

/// All repair statuses, covering both the regular and the rework flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairStatus {
    Pending,
    Repairing,
    Repaired,
    PickedUp,
    Unrepairable,
    Reworking,
    Reworked,
}

impl RepairStatus {
    /// Wire/storage token (snake_case, matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            RepairStatus::Pending => "pending",
            RepairStatus::Repairing => "repairing",
            RepairStatus::Repaired => "repaired",
            RepairStatus::PickedUp => "picked_up",
            RepairStatus::Unrepairable => "unrepairable",
            RepairStatus::Reworking => "reworking",
            RepairStatus::Reworked => "reworked",
        }
    }

    /// Parse a wire/storage token back into a status.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "pending" => Some(RepairStatus::Pending),
            "repairing" => Some(RepairStatus::Repairing),
            "repaired" => Some(RepairStatus::Repaired),
            "picked_up" => Some(RepairStatus::PickedUp),
            "unrepairable" => Some(RepairStatus::Unrepairable),
            "reworking" => Some(RepairStatus::Reworking),
            "reworked" => Some(RepairStatus::Reworked),
            _ => None,
        }
    }

    /// Display label shown to shop staff. Kept separate from the wire token
    /// so domain logic stays locale-independent.
    pub fn label(&self) -> &'static str {
        match self {
            RepairStatus::Pending => "未维修",
            RepairStatus::Repairing => "维修中",
            RepairStatus::Repaired => "已维修",
            RepairStatus::PickedUp => "已取件",
            RepairStatus::Unrepairable => "无法维修",
            RepairStatus::Reworking => "返修中",
            RepairStatus::Reworked => "返修完成",
        }
    }

    /// Whether this status belongs to the rework flow.
    pub fn is_rework_status(&self) -> bool {
        matches!(self, RepairStatus::Reworking | RepairStatus::Reworked)
    }
}

/// Side effect a planned transition carries beyond the status write itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    /// Plain status update, no warranty mutation.
    None,
    /// First-time pickup: issue a new warranty for the repair.
    IssueWarranty,
    /// Pickup while under rework: close the rework cycle on the existing
    /// warranty (clear flags, bump the rework counter).
    CompleteRework,
}

/// A validated transition: the status to write plus its side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPlan {
    pub next_status: RepairStatus,
    pub effect: TransitionEffect,
}

/// Rejected transition requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// A rework-flow status was requested while the repair is not under rework.
    #[error("status '{0}' is only valid while the repair is under warranty rework")]
    RequiresRework(&'static str),

    /// A regular-flow status was requested while the repair is under rework.
    #[error("status '{0}' is not valid while the repair is under warranty rework")]
    NotAllowedDuringRework(&'static str),
}

/// Decide what a requested status change must do, given the repair's current
/// rework flag.
///
/// `picked_up` is special-cased per flow: it issues a warranty in the regular
/// flow and completes the rework cycle in the rework flow. Movement between
/// the remaining statuses of the active flow is unrestricted; the shop uses
/// that for manual corrections.
pub fn plan_transition(
    is_rework: bool,
    requested: RepairStatus,
) -> Result<TransitionPlan, TransitionError> {
    let effect = match (is_rework, requested) {
        (true, RepairStatus::PickedUp) => TransitionEffect::CompleteRework,
        (false, RepairStatus::PickedUp) => TransitionEffect::IssueWarranty,
        (true, s) if !s.is_rework_status() => {
            return Err(TransitionError::NotAllowedDuringRework(s.as_str()));
        }
        (false, s) if s.is_rework_status() => {
            return Err(TransitionError::RequiresRework(s.as_str()));
        }
        _ => TransitionEffect::None,
    };
    Ok(TransitionPlan {
        next_status: requested,
        effect,
    })
}

/// What a committed transition actually did, with enough detail to build the
/// user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    StatusOnly {
        status: RepairStatus,
    },
    WarrantyIssued {
        status: RepairStatus,
        warranty_id: String,
        expires_at: Timestamp,
    },
    ReworkCompleted {
        status: RepairStatus,
        rework_count: i32,
    },
}

impl TransitionOutcome {
    /// The success message shown to the user after the transition commits.
    pub fn message(&self) -> String {
        match self {
            TransitionOutcome::StatusOnly { status } => {
                format!(
                    "update successful; current repair status is {}",
                    status.label()
                )
            }
            TransitionOutcome::WarrantyIssued { expires_at, .. } => {
                format!(
                    "successfully picked up; you may now view warranty status \
                     in the warranty section (valid until {})",
                    format_expiry_date(*expires_at)
                )
            }
            TransitionOutcome::ReworkCompleted { status, .. } => {
                format!(
                    "successfully picked up; this phone's rework is complete; \
                     current repair status is {}",
                    status.label()
                )
            }
        }
    }
}
