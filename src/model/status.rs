/// Post status definitions for tracking processing progress
///
/// A post enters the pipeline as `PendingSummary` and moves through
/// summarization, moderation and publication until it is archived.
use std::fmt;

/// Represents the current processing state of a persisted post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostStatus {
    // ===== Summarization =====
    /// Freshly ingested, waiting for a summary
    PendingSummary,

    /// Summary generated and stored
    SummaryReady,

    /// Summarization failed and will be attempted again
    SummaryRetry,

    /// Summarizer refused the content
    SummaryCensored,

    // ===== Moderation =====
    ModerationApproved,
    ModerationRejected,

    // ===== Publication =====
    Scheduled,
    Published,

    /// Final resting state
    Archived,
}

impl PostStatus {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Archived)
    }

    /// Returns true if the post is waiting for the summarizer
    pub fn awaits_summary(&self) -> bool {
        matches!(self, Self::PendingSummary | Self::SummaryRetry)
    }

    /// Returns true if moving from `self` to `next` is a valid transition
    pub fn can_transition_to(&self, next: PostStatus) -> bool {
        use PostStatus::*;

        match self {
            PendingSummary | SummaryRetry => {
                matches!(next, SummaryReady | SummaryRetry | SummaryCensored)
            }
            SummaryReady => matches!(next, ModerationApproved | ModerationRejected | Archived),
            SummaryCensored | ModerationRejected | Published => next == Archived,
            ModerationApproved => matches!(next, Scheduled | Archived),
            Scheduled => matches!(next, Published | Archived),
            Archived => false,
        }
    }

    /// Converts the status to a database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::PendingSummary => "pending_summary",
            Self::SummaryReady => "summary_ready",
            Self::SummaryRetry => "summary_retry",
            Self::SummaryCensored => "summary_censored",
            Self::ModerationApproved => "moderation_approved",
            Self::ModerationRejected => "moderation_rejected",
            Self::Scheduled => "scheduled",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    /// Parses a status from a database string representation
    ///
    /// Returns None if the string doesn't match any known status.
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "pending_summary" => Some(Self::PendingSummary),
            "summary_ready" => Some(Self::SummaryReady),
            "summary_retry" => Some(Self::SummaryRetry),
            "summary_censored" => Some(Self::SummaryCensored),
            "moderation_approved" => Some(Self::ModerationApproved),
            "moderation_rejected" => Some(Self::ModerationRejected),
            "scheduled" => Some(Self::Scheduled),
            "published" => Some(Self::Published),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    /// Returns all statuses in lifecycle order
    pub fn all_statuses() -> Vec<Self> {
        vec![
            Self::PendingSummary,
            Self::SummaryReady,
            Self::SummaryRetry,
            Self::SummaryCensored,
            Self::ModerationApproved,
            Self::ModerationRejected,
            Self::Scheduled,
            Self::Published,
            Self::Archived,
        ]
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}
