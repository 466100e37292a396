//! Aggregate shapes returned by the dashboard service.

use chrono::NaiveDate;

/// Affiliate totals grouped by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub total: u64,
    pub pending: u64,
    pub sent: u64,
    pub rejected: u64,
    pub already_member: u64,
}

/// Count of events on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Count of people in one state (UF).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateCount {
    pub state: String,
    pub count: u64,
}
